//! Widget trait and the widgets that make up the search affordance.

mod search_box;
mod spinner;
mod text_field;
mod traits;

pub use search_box::{SearchBox, SearchBoxConfig, SearchReporter};
pub use spinner::Spinner;
pub use text_field::{TextField, TextFieldConfig};
pub use traits::Widget;
