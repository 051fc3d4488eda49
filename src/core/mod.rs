// Core logic exports
pub mod enrichment;
pub mod pagination;
pub mod query;

pub use enrichment::{apply_enrichment, format_probability};
pub use pagination::{total_pages, Pagination, DEFAULT_PAGE, DEFAULT_PAGE_SIZE};
pub use query::{count_query, page_query, predicates, Column, Predicate};
