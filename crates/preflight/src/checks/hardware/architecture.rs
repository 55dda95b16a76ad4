use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArchitectureCheck {
    pub machine: String,
    pub matches: bool,
}

/// Case-sensitive comparison of the machine identifier against `accepted`.
pub fn evaluate_architecture(machine: &str, accepted: &[String]) -> ArchitectureCheck {
    ArchitectureCheck {
        machine: machine.to_string(),
        matches: accepted.iter().any(|arch| arch == machine),
    }
}
