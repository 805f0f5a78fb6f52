//! Built-in widgets: Label, Container, Button, Input, Hosted.

pub mod button;
pub mod container;
pub mod hosted;
pub mod input;
pub mod label;

pub use button::Button;
pub use container::Container;
pub use hosted::{Hosted, WidgetAdapter};
pub use input::Input;
pub use label::Label;
