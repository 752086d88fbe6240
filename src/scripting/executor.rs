use rhai::Dynamic;
use tracing::debug;

use super::EngineLimits;
use crate::execution::{EngineError, ExecutionContext, Executor};

/// Evaluates a script on a fresh Rhai engine per run
pub struct RhaiExecutor {
    limits: EngineLimits,
}

impl RhaiExecutor {
    pub fn new(limits: EngineLimits) -> Self {
        Self { limits }
    }
}

impl Default for RhaiExecutor {
    fn default() -> Self {
        Self::new(EngineLimits::default())
    }
}

impl Executor for RhaiExecutor {
    fn execute(&self, source: &str, context: &ExecutionContext) -> Result<String, EngineError> {
        debug!(run = ?context.run(), bytes = source.len(), "evaluating script");
        let mut engine = self.limits.build_engine();

        for (name, capture) in context.functions() {
            if name == "print" {
                // `print` is a Rhai keyword and always goes through the print callback
                engine.on_print(move |text| capture.emit(text));
            } else {
                engine.register_fn(name, move |value: Dynamic| capture.emit(value));
            }
        }

        let ast = engine
            .compile(source)
            .map_err(|e| EngineError::new(format!("Script parse error: {}", e)))?;
        let value = engine
            .eval_ast::<Dynamic>(&ast)
            .map_err(|e| EngineError::new(e.to_string()))?;

        Ok(display_value(&value))
    }
}

/// Rhai renders unit as an empty string; the playground shows `()`
fn display_value(value: &Dynamic) -> String {
    if value.is_unit() {
        "()".to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::execution::{ExecutionCoordinator, RunState};

    async fn run_script(source: &str) -> Vec<String> {
        let (mut exec, mut events) = ExecutionCoordinator::new(Arc::new(RhaiExecutor::default()));
        let output = exec.run(source, &mut events).await.unwrap().lines().to_vec();
        assert_eq!(exec.state(), RunState::Idle);
        output
    }

    #[tokio::test]
    async fn hello_world_with_arithmetic() {
        let output = run_script(
            r#"let a = 1; let b = 2; p("Hello, World!"); p("a + b = " + (a + b));"#,
        )
        .await;
        assert_eq!(output, ["Hello, World!", "a + b = 3", "\nResult: ()"]);
    }

    #[tokio::test]
    async fn statement_result_displays_as_unit() {
        let output = run_script("let x = 1;").await;
        assert_eq!(output, ["\nResult: ()"]);
    }

    #[tokio::test]
    async fn trailing_expression_after_unit_is_the_result() {
        let output = run_script("(); 40 + 2").await;
        assert_eq!(output, ["\nResult: 42"]);
    }

    #[test]
    fn unit_and_values_render() {
        assert_eq!(display_value(&Dynamic::UNIT), "()");
        assert_eq!(display_value(&Dynamic::from(42_i64)), "42");
        assert_eq!(display_value(&Dynamic::from("hi".to_string())), "hi");
    }

    #[tokio::test]
    async fn all_capture_aliases_write_in_call_order() {
        let output = run_script(r#"print("one"); println(2); p([3]); 40 + 2"#).await;
        assert_eq!(output, ["one", "2", "[3]", "\nResult: 42"]);
    }

    #[tokio::test]
    async fn runtime_error_keeps_partial_output() {
        let output = run_script(r#"let x = 5; p("x = " + x); x / 0"#).await;
        assert_eq!(output.len(), 2);
        assert_eq!(output[0], "x = 5");
        assert!(
            output[1].starts_with("Error: Division by zero"),
            "got {:?}",
            output[1]
        );
    }

    #[tokio::test]
    async fn thrown_values_become_errors() {
        let output = run_script(r#"p("start"); throw "custom failure";"#).await;
        assert_eq!(output[0], "start");
        assert!(output[1].starts_with("Error: "));
        assert!(output[1].contains("custom failure"));
    }

    #[tokio::test]
    async fn parse_errors_fail_the_run() {
        let output = run_script("let = ;").await;
        assert_eq!(output.len(), 1);
        assert!(output[0].starts_with("Error: Script parse error"));
    }

    #[tokio::test]
    async fn runaway_loop_hits_the_operation_limit() {
        let limits = EngineLimits {
            max_operations: 5_000,
            max_expr_depth: 64,
        };
        let (mut exec, mut events) = ExecutionCoordinator::new(Arc::new(RhaiExecutor::new(limits)));
        let output = exec.run("loop { }", &mut events).await.unwrap();
        assert_eq!(output.len(), 1);
        assert!(output.lines()[0].starts_with("Error: "));
    }
}
