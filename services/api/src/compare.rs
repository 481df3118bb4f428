use crate::infra::build_analyzer;
use clap::Args;
use clarity::config::AppConfig;
use clarity::error::AppError;
use clarity::pay::report::format_currency;
use clarity::pay::{ComparisonReport, FormState, UserFormSubmission};
use clarity::remote::{FeedbackResponse, PredictionComparison, RemoteOutcome};
use clarity::session::RemoteInsights;

#[derive(Args, Debug)]
pub(crate) struct CompareArgs {
    /// Job title, e.g. "Software Engineer"
    #[arg(long)]
    pub(crate) job_role: String,
    /// Annual salary in GBP
    #[arg(long)]
    pub(crate) salary: String,
    #[arg(long, default_value = "Full-time")]
    pub(crate) employment_type: String,
    #[arg(long, default_value = "Male")]
    pub(crate) gender: String,
    #[arg(long, default_value = "30")]
    pub(crate) age: String,
    /// Years of experience
    #[arg(long, default_value = "5")]
    pub(crate) experience: String,
    /// Number of children
    #[arg(long, default_value = "0")]
    pub(crate) children: String,
    #[arg(long, default_value = "White")]
    pub(crate) ethnicity: String,
    #[arg(long, default_value = "Bachelor's")]
    pub(crate) education: String,
    /// Also request AI feedback and a salary prediction from the configured endpoints
    #[arg(long)]
    pub(crate) remote: bool,
}

impl CompareArgs {
    fn form(&self) -> FormState {
        FormState {
            job_role: self.job_role.clone(),
            salary: self.salary.clone(),
            employment_type: self.employment_type.clone(),
            gender: self.gender.clone(),
            age: self.age.clone(),
            experience: self.experience.clone(),
            children: self.children.clone(),
            ethnicity: self.ethnicity.clone(),
            education: self.education.clone(),
        }
    }
}

pub(crate) async fn run_compare(args: CompareArgs) -> Result<(), AppError> {
    let submission = args.form().into_submission()?;
    let config = AppConfig::load()?;
    let analyzer = build_analyzer(&config)?;

    let report = analyzer.compare(&submission);
    print!("{}", render_comparison(&submission, &report));

    if args.remote {
        let insights = analyzer.fetch_remote(&submission).await;
        print!("{}", render_remote(&insights));
    }

    Ok(())
}

pub(crate) fn render_comparison(
    submission: &UserFormSubmission,
    report: &ComparisonReport,
) -> String {
    let mut out = format!(
        "Pay comparison for {} earning {}\n",
        submission.job_role,
        format_currency(submission.salary)
    );

    out.push_str("\nMarket comparison\n");
    for row in &report.chart {
        out.push_str(&format!(
            "- {}: average {}, you {} ({}, {})\n",
            row.label,
            row.average_bar.display_value,
            row.user_bar.display_value,
            row.difference,
            row.tone.label()
        ));
    }

    out.push_str(&format!("\nSummary\n{}\n", report.summary));
    out
}

pub(crate) fn render_remote(insights: &RemoteInsights) -> String {
    let mut out = String::from("\nAI feedback\n");
    match &insights.feedback {
        RemoteOutcome::Ready { value, .. } => out.push_str(&render_feedback(value)),
        RemoteOutcome::Error { message } => {
            out.push_str(&format!("Feedback unavailable: {message}\n"))
        }
    }

    out.push_str("\nSalary prediction\n");
    match &insights.prediction {
        RemoteOutcome::Ready { value, .. } => out.push_str(&render_prediction(value)),
        RemoteOutcome::Error { message } => out.push_str(&format!("{message}\n")),
    }
    out
}

fn render_feedback(feedback: &FeedbackResponse) -> String {
    let mut out = format!("{}\n", feedback.analysis);
    if let Some(gap) = feedback.pay_gap_display() {
        out.push_str(&format!("Pay gap: {gap}\n"));
    }
    if !feedback.factors.is_empty() {
        out.push_str("Key factors:\n");
        for factor in &feedback.factors {
            out.push_str(&format!("- {factor}\n"));
        }
    }
    if !feedback.recommendations.is_empty() {
        out.push_str("Recommendations:\n");
        for recommendation in &feedback.recommendations {
            out.push_str(&format!("- {recommendation}\n"));
        }
    }
    out
}

fn render_prediction(prediction: &PredictionComparison) -> String {
    format!(
        "Predicted {} vs your {}: {} ({}), {}\n{}\n",
        format_currency(prediction.predicted_salary),
        format_currency(prediction.salary),
        prediction.display_difference,
        prediction.display_percent,
        prediction.verdict.label(),
        prediction.message
    )
}
