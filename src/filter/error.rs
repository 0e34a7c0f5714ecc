use thiserror::Error;

use crate::filter::component::Component;

/// Why a single `major`, `minor` or `patch` pattern is unusable
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComponentError {
    #[error("empty pattern")]
    Empty,

    #[error("only allowed symbol after {keyword} is {expected}")]
    WrongOperator {
        keyword: &'static str,
        expected: char,
    },

    #[error("{keyword}{operator} should be followed by a number")]
    InvalidOffset {
        keyword: &'static str,
        operator: char,
    },

    #[error("must start with FIRST or LAST")]
    MissingKeyword,

    #[error("wrong regexp format: {0}")]
    InvalidRegex(String),
}

/// A component error tagged with the component it was found in
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to validate {component} pattern: {source}")]
pub struct ComponentValidationError {
    pub component: Component,
    pub source: ComponentError,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("can't convert {0:?} to version pattern")]
    Parse(String),

    #[error("invalid version pattern {pattern:?}: {}", join_errors(.errors))]
    Validation {
        pattern: String,
        errors: Vec<ComponentValidationError>,
    },

    #[error("invalid global position filter {value:?}: {source}")]
    InvalidPosition {
        value: String,
        source: ComponentError,
    },

    #[error("filter {0:?} combines \" and \" with \" or \", which is not supported")]
    MixedOperators(String),
}

fn join_errors(errors: &[ComponentValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(ComponentError::Empty, "empty pattern")]
    #[case(
        ComponentError::WrongOperator { keyword: "LAST", expected: '-' },
        "only allowed symbol after LAST is -"
    )]
    #[case(
        ComponentError::InvalidOffset { keyword: "FIRST", operator: '+' },
        "FIRST+ should be followed by a number"
    )]
    #[case(ComponentError::MissingKeyword, "must start with FIRST or LAST")]
    fn component_error_display(#[case] error: ComponentError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[test]
    fn validation_error_lists_every_component() {
        let error = FilterError::Validation {
            pattern: ".LAST+1.*".to_string(),
            errors: vec![
                ComponentValidationError {
                    component: Component::Major,
                    source: ComponentError::Empty,
                },
                ComponentValidationError {
                    component: Component::Minor,
                    source: ComponentError::WrongOperator {
                        keyword: "LAST",
                        expected: '-',
                    },
                },
            ],
        };

        assert_eq!(
            error.to_string(),
            "invalid version pattern \".LAST+1.*\": \
             failed to validate major pattern: empty pattern; \
             failed to validate minor pattern: only allowed symbol after LAST is -"
        );
    }

    #[test]
    fn invalid_position_has_source() {
        let error = FilterError::InvalidPosition {
            value: "5".to_string(),
            source: ComponentError::MissingKeyword,
        };

        assert!(std::error::Error::source(&error).is_some());
        assert_eq!(
            error.to_string(),
            "invalid global position filter \"5\": must start with FIRST or LAST"
        );
    }

    #[test]
    fn filter_error_into_anyhow_preserves_chain() {
        let error = FilterError::InvalidPosition {
            value: "LAST+1".to_string(),
            source: ComponentError::WrongOperator {
                keyword: "LAST",
                expected: '-',
            },
        };
        let anyhow_err: anyhow::Error = error.into();

        let chain: Vec<String> = anyhow_err.chain().map(|e| e.to_string()).collect();
        assert_eq!(chain[1], "only allowed symbol after LAST is -");
    }
}
