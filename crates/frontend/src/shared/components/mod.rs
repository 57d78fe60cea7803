pub mod pagination_controls;
pub mod table_checkbox;
pub mod toast_stack;
