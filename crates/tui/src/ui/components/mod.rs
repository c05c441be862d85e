pub mod card;
pub mod dialog;
pub mod form;
pub mod hints;
pub mod toast;
