pub mod decision;
pub mod fields;
pub mod interpreter;
pub mod plan;

pub use decision::{allowed_decisions, default_decision, ImportDecision};
pub use fields::{CellParser, RawRow};
pub use interpreter::{
    ExistingResult, ImportPreview, ParsedResultRow, ResultRowInterpreter, RowWarning, SkipReason, SkippedRow,
};
pub use plan::{build_plan, AthleteDraft, ImportPlan, PlannedWrite};
