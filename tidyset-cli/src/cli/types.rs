use clap::ValueEnum;
use std::str::FromStr;
use tidyset_core::{OpKind, Operation};

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq)]
pub enum OutputFormat {
    Summary,
    Json,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq)]
pub enum PreviewArg {
    Table,
    Summary,
    None,
}

impl PreviewArg {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Table => "table",
            Self::Summary => "summary",
            Self::None => "none",
        }
    }
}

/// A single `--op` argument: `[STEP:]TYPE=VALUE`.
///
/// The step prefix is optional; operations without one are numbered by
/// their position on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpArg {
    pub step: Option<u32>,
    pub kind: OpKind,
    pub value: String,
}

impl FromStr for OpArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (head, value) = s
            .split_once('=')
            .ok_or_else(|| format!("expected [STEP:]TYPE=VALUE, got '{s}'"))?;

        let (step, kind) = match head.split_once(':') {
            Some((step, kind)) => {
                let step = step
                    .parse::<u32>()
                    .map_err(|_| format!("invalid step number '{step}'"))?;
                (Some(step), kind)
            },
            None => (None, head),
        };

        let kind = match kind {
            "add_prefix" | "add-prefix" => OpKind::AddPrefix,
            "remove_prefix" | "remove-prefix" => OpKind::RemovePrefix,
            "add_suffix" | "add-suffix" => OpKind::AddSuffix,
            "remove_suffix" | "remove-suffix" => OpKind::RemoveSuffix,
            other => {
                return Err(format!(
                    "unknown operation type '{other}' (expected add_prefix, remove_prefix, add_suffix, or remove_suffix)"
                ))
            },
        };

        Ok(Self {
            step,
            kind,
            value: value.to_string(),
        })
    }
}

/// Turn parsed `--op` arguments into engine operations, numbering the ones
/// without an explicit step by command-line position.
pub fn resolve_operations(args: &[OpArg]) -> Vec<Operation> {
    args.iter()
        .enumerate()
        .map(|(index, arg)| {
            let step = arg
                .step
                .unwrap_or_else(|| u32::try_from(index + 1).unwrap_or(u32::MAX));
            Operation::new(step, arg.kind, arg.value.clone())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_op_with_step() {
        let arg: OpArg = "2:remove_suffix=_copy".parse().unwrap();
        assert_eq!(arg.step, Some(2));
        assert_eq!(arg.kind, OpKind::RemoveSuffix);
        assert_eq!(arg.value, "_copy");
    }

    #[test]
    fn test_parse_op_without_step() {
        let arg: OpArg = "add-prefix=dataset".parse().unwrap();
        assert_eq!(arg.step, None);
        assert_eq!(arg.kind, OpKind::AddPrefix);
        assert_eq!(arg.value, "dataset");
    }

    #[test]
    fn test_parse_op_value_may_contain_equals() {
        let arg: OpArg = "add_suffix=a=b".parse().unwrap();
        assert_eq!(arg.value, "a=b");
    }

    #[test]
    fn test_parse_op_rejects_garbage() {
        assert!("add_prefix".parse::<OpArg>().is_err());
        assert!("x:add_prefix=v".parse::<OpArg>().is_err());
        assert!("frobnicate=v".parse::<OpArg>().is_err());
    }

    #[test]
    fn test_resolve_operations_numbers_by_position() {
        let args = vec![
            "remove_suffix=_copy".parse::<OpArg>().unwrap(),
            "add_prefix=dup".parse::<OpArg>().unwrap(),
        ];
        let ops = resolve_operations(&args);
        assert_eq!(ops[0].step, 1);
        assert_eq!(ops[1].step, 2);
    }

    #[test]
    fn test_resolve_operations_keeps_explicit_steps() {
        let args = vec!["5:add_prefix=x".parse::<OpArg>().unwrap()];
        let ops = resolve_operations(&args);
        assert_eq!(ops[0].step, 5);
    }
}
