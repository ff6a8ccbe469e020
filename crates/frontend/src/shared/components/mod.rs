pub mod card_value;
pub mod date_input;
pub mod stat_card;
pub mod table;
