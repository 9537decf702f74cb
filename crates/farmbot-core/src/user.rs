//! Marketplace user roles.
//!
//! The advisory assistant is a producer-facing feature; surfaces check the
//! role before mounting it. The engine itself is role-agnostic.

use serde::{Deserialize, Serialize};

/// Role of the current marketplace user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Producer,
    Consumer,
    Supplier,
}

impl Role {
    pub fn is_producer(&self) -> bool {
        matches!(self, Self::Producer)
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "producer" | "farmer" => Ok(Self::Producer),
            "consumer" => Ok(Self::Consumer),
            "supplier" => Ok(Self::Supplier),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Producer => "producer",
            Self::Consumer => "consumer",
            Self::Supplier => "supplier",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_roles_including_the_legacy_alias() {
        assert_eq!("producer".parse::<Role>().unwrap(), Role::Producer);
        assert_eq!("FARMER".parse::<Role>().unwrap(), Role::Producer);
        assert_eq!("consumer".parse::<Role>().unwrap(), Role::Consumer);
        assert!("merchant".parse::<Role>().is_err());
    }

    #[test]
    fn only_producers_pass_the_gate() {
        assert!(Role::Producer.is_producer());
        assert!(!Role::Consumer.is_producer());
        assert!(!Role::Supplier.is_producer());
    }
}
