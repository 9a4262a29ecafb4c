mod field;
pub use field::{FieldDef, PivotFields, RelationKind};
