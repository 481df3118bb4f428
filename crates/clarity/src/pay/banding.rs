use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgeBand {
    #[serde(rename = "18-24")]
    UpTo24,
    #[serde(rename = "25-34")]
    From25To34,
    #[serde(rename = "35-44")]
    From35To44,
    #[serde(rename = "45-54")]
    From45To54,
    #[serde(rename = "55-64")]
    From55To64,
    #[serde(rename = "65+")]
    From65,
}

impl AgeBand {
    pub const fn ordered() -> [Self; 6] {
        [
            Self::UpTo24,
            Self::From25To34,
            Self::From35To44,
            Self::From45To54,
            Self::From55To64,
            Self::From65,
        ]
    }

    /// Upper bounds are exclusive; anything under 25 (including nonsense input) lands in 18-24.
    pub fn from_age(age: f64) -> Self {
        if age < 25.0 {
            Self::UpTo24
        } else if age < 35.0 {
            Self::From25To34
        } else if age < 45.0 {
            Self::From35To44
        } else if age < 55.0 {
            Self::From45To54
        } else if age < 65.0 {
            Self::From55To64
        } else {
            Self::From65
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::UpTo24 => "18-24",
            Self::From25To34 => "25-34",
            Self::From35To44 => "35-44",
            Self::From45To54 => "45-54",
            Self::From55To64 => "55-64",
            Self::From65 => "65+",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExperienceBand {
    #[serde(rename = "0-2")]
    UpTo2,
    #[serde(rename = "3-5")]
    From3To5,
    #[serde(rename = "6-10")]
    From6To10,
    #[serde(rename = "11-15")]
    From11To15,
    #[serde(rename = "16+")]
    From16,
}

impl ExperienceBand {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::UpTo2,
            Self::From3To5,
            Self::From6To10,
            Self::From11To15,
            Self::From16,
        ]
    }

    /// Upper bounds are inclusive, so 2.5 years already counts as 3-5.
    pub fn from_years(years: f64) -> Self {
        if years <= 2.0 {
            Self::UpTo2
        } else if years <= 5.0 {
            Self::From3To5
        } else if years <= 10.0 {
            Self::From6To10
        } else if years <= 15.0 {
            Self::From11To15
        } else {
            Self::From16
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::UpTo2 => "0-2",
            Self::From3To5 => "3-5",
            Self::From6To10 => "6-10",
            Self::From11To15 => "11-15",
            Self::From16 => "16+",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChildrenBand {
    #[serde(rename = "0")]
    None,
    #[serde(rename = "1")]
    One,
    #[serde(rename = "2+")]
    TwoOrMore,
}

impl ChildrenBand {
    pub const fn ordered() -> [Self; 3] {
        [Self::None, Self::One, Self::TwoOrMore]
    }

    pub const fn from_count(count: i64) -> Self {
        if count <= 0 {
            Self::None
        } else if count == 1 {
            Self::One
        } else {
            Self::TwoOrMore
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::None => "0",
            Self::One => "1",
            Self::TwoOrMore => "2+",
        }
    }
}
