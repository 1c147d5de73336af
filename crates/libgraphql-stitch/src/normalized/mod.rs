mod normalized_field;
mod normalized_query;

pub use normalized_field::NormalizedField;
pub use normalized_query::NormalizedQuery;

#[cfg(test)]
mod tests;
