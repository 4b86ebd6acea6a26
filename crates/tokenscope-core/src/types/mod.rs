//! Scene model shared by the analysis engine, the session and the host.

pub mod collections;
pub mod identifiers;
pub mod node;
pub mod paint;
pub mod style;
pub mod text;

pub use identifiers::{NodeId, PageId, StyleId, VariableId};
pub use node::{NodeKind, SceneNode, ShapeKind};
pub use paint::{ColorStop, GradientKind, Paint, PaintSet, PaintSlot, Rgba, StyleBinding, StyleSlot};
pub use style::{Style, StyleKind, Variable, VariableValue};
pub use text::{FontName, LetterSpacing, LineHeight, TextCase, TextDecoration, TextProps};
