use serde::Serialize;

/// Either endpoint of a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Boundary {
    Start,
    End,
}

impl Boundary {
    pub fn toggled(self) -> Self {
        match self {
            Boundary::Start => Boundary::End,
            Boundary::End => Boundary::Start,
        }
    }
}

impl std::fmt::Display for Boundary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Boundary::Start => write!(f, "start"),
            Boundary::End => write!(f, "end"),
        }
    }
}

impl std::str::FromStr for Boundary {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "start" | "s" => Ok(Boundary::Start),
            "end" | "e" => Ok(Boundary::End),
            other => Err(format!("unknown boundary: {other}")),
        }
    }
}
