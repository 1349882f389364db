pub mod metadata;
pub mod positions;
pub mod rules;
