pub mod gigachat;
pub mod token_store;
