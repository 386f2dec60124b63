//! Состояние списка товаров: зафиксированные фильтры, сортировка и
//! пагинация. В отличие от карты статусов, это состояние намеренно НЕ
//! переживает перезагрузку страницы.

/// Колонки, по которым backend умеет сортировать
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SortColumn {
    Name,
    Price,
    Expiration,
}

impl SortColumn {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortColumn::Name => "name",
            SortColumn::Price => "price",
            SortColumn::Expiration => "expiration",
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }

    fn flipped(&self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

pub const PAGE_SIZE_OPTIONS: [u32; 4] = [10, 20, 50, 100];

#[derive(Clone, Debug, PartialEq)]
pub struct ProductListState {
    // Зафиксированные фильтры (после debounce)
    pub name_filter: String,
    pub price_filter: String,
    pub expiration_filter: String,

    // Sorting
    pub sort: Option<(SortColumn, SortOrder)>,

    // Pagination (1-indexed)
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u32,

    pub is_loaded: bool,
}

impl Default for ProductListState {
    fn default() -> Self {
        Self {
            name_filter: String::new(),
            price_filter: String::new(),
            expiration_filter: String::new(),
            sort: None,
            page: 1,
            limit: 10,
            total: 0,
            total_pages: 1,
            is_loaded: false,
        }
    }
}

impl ProductListState {
    /// Любой commit фильтра возвращает на первую страницу
    pub fn commit_name_filter(&mut self, value: String) {
        self.name_filter = value;
        self.page = 1;
    }

    pub fn commit_price_filter(&mut self, value: String) {
        self.price_filter = value;
        self.page = 1;
    }

    pub fn commit_expiration_filter(&mut self, value: String) {
        self.expiration_filter = value;
        self.page = 1;
    }

    /// Повторный клик по активной колонке меняет направление, по новой — ASC
    pub fn toggle_sort(&mut self, column: SortColumn) {
        self.sort = match self.sort {
            Some((current, order)) if current == column => Some((column, order.flipped())),
            _ => Some((column, SortOrder::Asc)),
        };
        self.page = 1;
    }

    pub fn set_limit(&mut self, limit: u32) {
        if !PAGE_SIZE_OPTIONS.contains(&limit) {
            return;
        }
        self.limit = limit;
        self.page = 1;
    }

    /// Границы плюс guard от навигации во время текущей загрузки
    pub fn can_change_page(&self, new_page: u32, is_loading: bool) -> bool {
        new_page >= 1 && new_page <= self.total_pages && !is_loading
    }

    /// Применение ответа сервера; страница заменяется целиком
    pub fn apply_page(&mut self, page: u32, limit: u32, total: u64, total_pages: u32) {
        self.page = page;
        self.limit = limit;
        self.total = total;
        self.total_pages = total_pages.max(1);
        self.is_loaded = true;
    }

    /// Пара (sortBy, order) для запроса; None — сортировка не выбрана
    pub fn sort_params(&self) -> (Option<&'static str>, Option<&'static str>) {
        match self.sort {
            Some((column, order)) => (Some(column.as_str()), Some(order.as_str())),
            None => (None, None),
        }
    }

    pub fn sort_indicator(&self, column: SortColumn) -> &'static str {
        match self.sort {
            Some((current, SortOrder::Asc)) if current == column => " ↑",
            Some((current, SortOrder::Desc)) if current == column => " ↓",
            _ => " ⇅",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_toggle_flips_direction_on_second_click() {
        let mut state = ProductListState::default();
        state.toggle_sort(SortColumn::Price);
        assert_eq!(state.sort, Some((SortColumn::Price, SortOrder::Asc)));
        state.toggle_sort(SortColumn::Price);
        assert_eq!(state.sort, Some((SortColumn::Price, SortOrder::Desc)));
    }

    #[test]
    fn sort_on_new_column_starts_ascending() {
        let mut state = ProductListState::default();
        state.toggle_sort(SortColumn::Price);
        state.toggle_sort(SortColumn::Price);
        state.toggle_sort(SortColumn::Name);
        assert_eq!(state.sort, Some((SortColumn::Name, SortOrder::Asc)));
    }

    #[test]
    fn committed_changes_reset_page() {
        let mut state = ProductListState {
            page: 4,
            total_pages: 9,
            ..Default::default()
        };
        state.commit_name_filter("milk".to_string());
        assert_eq!(state.page, 1);

        state.page = 4;
        state.toggle_sort(SortColumn::Expiration);
        assert_eq!(state.page, 1);

        state.page = 4;
        state.set_limit(50);
        assert_eq!(state.page, 1);
        assert_eq!(state.limit, 50);
    }

    #[test]
    fn unknown_limit_is_ignored() {
        let mut state = ProductListState::default();
        state.set_limit(37);
        assert_eq!(state.limit, 10);
    }

    #[test]
    fn page_change_guards_boundaries_and_loading() {
        let state = ProductListState {
            page: 2,
            total_pages: 5,
            ..Default::default()
        };
        assert!(!state.can_change_page(0, false));
        assert!(!state.can_change_page(6, false));
        assert!(!state.can_change_page(3, true));
        assert!(state.can_change_page(1, false));
        assert!(state.can_change_page(5, false));
    }

    #[test]
    fn total_pages_never_drops_below_one() {
        let mut state = ProductListState::default();
        state.apply_page(1, 10, 0, 0);
        assert_eq!(state.total_pages, 1);
        assert!(state.is_loaded);
    }

    #[test]
    fn sort_params_match_wire_names() {
        let mut state = ProductListState::default();
        assert_eq!(state.sort_params(), (None, None));
        state.toggle_sort(SortColumn::Expiration);
        assert_eq!(state.sort_params(), (Some("expiration"), Some("ASC")));
        state.toggle_sort(SortColumn::Expiration);
        assert_eq!(state.sort_params(), (Some("expiration"), Some("DESC")));
    }
}
