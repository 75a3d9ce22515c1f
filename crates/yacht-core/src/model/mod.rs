pub mod category;
pub mod dice;
pub mod hold;
pub mod scorecard;
pub mod scoring;
