#[cfg(test)]
#[path = "products_test.rs"]
mod products_test;

use crate::net::types::{ProductFilter, ProductPage};

/// State for the catalog page: current filters plus the fetched page.
#[derive(Clone, Debug, Default)]
pub struct ProductsState {
    pub page: ProductPage,
    pub filter: ProductFilter,
    pub loading: bool,
}

impl ProductsState {
    pub fn has_results(&self) -> bool {
        !self.page.products.is_empty()
    }

    pub fn has_prev_page(&self) -> bool {
        self.page.current_page > 1
    }

    pub fn has_next_page(&self) -> bool {
        self.page.current_page < self.page.pages
    }
}
