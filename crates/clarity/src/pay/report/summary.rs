use crate::pay::comparison::ComparisonMetric;
use super::format::round_to_tenth;

const NOTABLE_DIFFERENCE: f64 = 5.0;

const NEED_MORE_INFORMATION: &str = "We need more information to generate personalised feedback.";
const CLOSELY_ALIGNED: &str =
    "Your salary is closely aligned with the market across every factor we track.";
const REMAINING_IN_LINE: &str =
    "Your pay sits broadly in line with the market across the remaining factors.";
const SHORTFALL_ADVICE: &str =
    "Consider reviewing your development, role scope, or negotiation approach there.";

/// Short narrative over the comparison metrics: strongest lead, widest gap, and whether the
/// rest sit in line with the market.
pub fn summarize(metrics: &[ComparisonMetric]) -> String {
    if metrics.is_empty() {
        return NEED_MORE_INFORMATION.to_string();
    }

    let positives: Vec<&ComparisonMetric> = metrics
        .iter()
        .filter(|metric| metric.percent_difference >= NOTABLE_DIFFERENCE)
        .collect();
    let negatives: Vec<&ComparisonMetric> = metrics
        .iter()
        .filter(|metric| metric.percent_difference <= -NOTABLE_DIFFERENCE)
        .collect();

    let mut sentences = Vec::new();

    if let Some(strongest) = first_extreme(&positives, |candidate, best| candidate > best) {
        let suffix = if positives.len() > 1 {
            " while similar gains appear in other areas"
        } else {
            ""
        };
        sentences.push(format!(
            "You outpace the market for {} by {:.1}%{suffix}.",
            readable_subject(&strongest.label),
            round_to_tenth(strongest.percent_difference.abs())
        ));
    }

    if let Some(widest) = first_extreme(&negatives, |candidate, worst| candidate < worst) {
        let suffix = if negatives.len() > 1 {
            " and a few related factors follow the same pattern"
        } else {
            ""
        };
        sentences.push(format!(
            "You're about {:.1}% below the average for {}{suffix}. {SHORTFALL_ADVICE}",
            round_to_tenth(widest.percent_difference.abs()),
            readable_subject(&widest.label)
        ));
    }

    let neutral_count = metrics.len() - positives.len() - negatives.len();
    if neutral_count > 0 {
        sentences.push(REMAINING_IN_LINE.to_string());
    }

    if sentences.is_empty() {
        return CLOSELY_ALIGNED.to_string();
    }

    sentences.join(" ")
}

/// Keeps the earliest metric unless a later one strictly beats it.
fn first_extreme<'a>(
    metrics: &[&'a ComparisonMetric],
    beats: impl Fn(f64, f64) -> bool,
) -> Option<&'a ComparisonMetric> {
    metrics.iter().copied().reduce(|chosen, candidate| {
        if beats(candidate.percent_difference, chosen.percent_difference) {
            candidate
        } else {
            chosen
        }
    })
}

/// `"Age band: 25-34"` reads as `"age band (25-34)"`; a label without detail is just lower-cased.
pub fn readable_subject(label: &str) -> String {
    let (category, detail) = match label.split_once(':') {
        Some((category, rest)) => {
            // only the segment up to a second colon counts as detail
            let detail = rest.split(':').next().unwrap_or_default();
            (category, detail.trim())
        }
        None => (label, ""),
    };

    let category = category.trim().to_lowercase();
    if detail.is_empty() {
        category
    } else {
        format!("{category} ({detail})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pay::comparison::ComparisonDimension;

    fn metric(id: ComparisonDimension, label: &str, percent_difference: f64) -> ComparisonMetric {
        ComparisonMetric {
            id,
            label: label.to_string(),
            description: id.description(),
            average: 50000.0,
            user: 50000.0,
            percent_difference,
        }
    }

    #[test]
    fn empty_metrics_ask_for_more_information() {
        assert_eq!(summarize(&[]), NEED_MORE_INFORMATION);
    }

    #[test]
    fn all_neutral_metrics_report_alignment_sentence() {
        let metrics = vec![
            metric(ComparisonDimension::Gender, "Gender: Female", 4.9),
            metric(ComparisonDimension::Age, "Age band: 35-44", -4.9),
        ];
        assert_eq!(summarize(&metrics), REMAINING_IN_LINE);
    }

    #[test]
    fn single_outperformance_has_no_suffix() {
        let metrics = vec![metric(
            ComparisonDimension::JobRole,
            "Job role: Manager",
            12.345,
        )];
        assert_eq!(
            summarize(&metrics),
            "You outpace the market for job role (Manager) by 12.3%."
        );
    }

    #[test]
    fn strongest_positive_wins_and_mentions_other_gains() {
        let metrics = vec![
            metric(ComparisonDimension::JobRole, "Job role: Software Engineer", 32.35),
            metric(ComparisonDimension::Age, "Age band: 25-34", 100.0),
            metric(ComparisonDimension::Children, "Children: 0", 2.0),
        ];
        assert_eq!(
            summarize(&metrics),
            "You outpace the market for age band (25-34) by 100.0% while similar gains appear in other areas. \
             Your pay sits broadly in line with the market across the remaining factors."
        );
    }

    #[test]
    fn ties_resolve_to_first_encountered() {
        let metrics = vec![
            metric(ComparisonDimension::Gender, "Gender: Male", 10.0),
            metric(ComparisonDimension::Ethnicity, "Ethnicity: White", 10.0),
            metric(ComparisonDimension::JobRole, "Job role: Manager", -7.0),
            metric(ComparisonDimension::Age, "Age band: 45-54", -7.0),
        ];
        let summary = summarize(&metrics);
        assert!(summary.starts_with("You outpace the market for gender (Male) by 10.0%"));
        assert!(summary.contains("below the average for job role (Manager) and a few"));
    }

    #[test]
    fn widest_shortfall_carries_advice() {
        let metrics = vec![
            metric(ComparisonDimension::EmploymentType, "Employment type: Part-time", -5.0),
            metric(ComparisonDimension::Experience, "Experience: 16+ years", -20.04),
        ];
        assert_eq!(
            summarize(&metrics),
            "You're about 20.0% below the average for experience (16+ years) and a few related factors \
             follow the same pattern. Consider reviewing your development, role scope, or negotiation approach there."
        );
    }

    #[test]
    fn readable_subject_handles_missing_detail() {
        assert_eq!(readable_subject("Age band: 25-34"), "age band (25-34)");
        assert_eq!(readable_subject("Overall"), "overall");
        assert_eq!(readable_subject("Gender:  "), "gender");
        assert_eq!(readable_subject("Job role: A: B"), "job role (A)");
    }
}
