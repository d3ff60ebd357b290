//! Request-bound query builder
//!
//! [`GridBuilder`] collects an endpoint's configuration and validates it up
//! front; the resulting [`Grid`] turns request parameters into a constrained
//! sea-orm query and runs it.

use std::sync::Arc;

use sea_orm::{
    ColumnTrait, Condition, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Select,
};
use serde_json::Value;
use tracing::debug;

use super::export::{rows_to_csv, ExportOptions};
use crate::domain::grid::{
    parse_sorts, validate_filters, validate_page, validate_per_page, validate_search,
    validate_sorts, DefaultsOverride, Filterable, GridDefaults, GridState, RequestParams,
    Searchable, Sortable,
};
use crate::shared::{AppResult, GridError, PaginatedResult};

/// Produces the base query of a grid, usually `Entity::find()`.
pub type QueryFn<E> = Arc<dyn Fn() -> Select<E> + Send + Sync>;

/// Collects the configuration of one list endpoint.
pub struct GridBuilder<E: EntityTrait> {
    defaults: GridDefaults,
    query_fn: Option<QueryFn<E>>,
    searchables: Vec<Searchable<E>>,
    filterables: Vec<(String, Filterable<E>)>,
    sortables: Vec<(String, Sortable<E>)>,
    export: Option<ExportOptions>,
}

impl<E: EntityTrait> GridBuilder<E> {
    pub fn new(defaults: GridDefaults) -> Self {
        Self {
            defaults,
            query_fn: None,
            searchables: Vec::new(),
            filterables: Vec::new(),
            sortables: Vec::new(),
            export: None,
        }
    }

    pub fn query<F>(mut self, f: F) -> Self
    where
        F: Fn() -> Select<E> + Send + Sync + 'static,
    {
        self.query_fn = Some(Arc::new(f));
        self
    }

    /// Merge endpoint-specific defaults over the current ones.
    pub fn defaults(mut self, overrides: DefaultsOverride) -> Self {
        self.defaults = self.defaults.merged(&overrides);
        self
    }

    pub fn searchable(mut self, searchable: Searchable<E>) -> Self {
        self.searchables.push(searchable);
        self
    }

    /// Replace all searchables.
    pub fn searchables<I>(mut self, searchables: I) -> Self
    where
        I: IntoIterator<Item = Searchable<E>>,
    {
        self.searchables = searchables.into_iter().collect();
        self
    }

    /// Register a filterable; a repeated name replaces the earlier entry.
    pub fn filterable(mut self, name: impl Into<String>, filterable: Filterable<E>) -> Self {
        upsert(&mut self.filterables, name.into(), filterable);
        self
    }

    /// Register a sortable; a repeated name replaces the earlier entry.
    pub fn sortable(mut self, name: impl Into<String>, sortable: Sortable<E>) -> Self {
        upsert(&mut self.sortables, name.into(), sortable);
        self
    }

    pub fn export_options(mut self, options: ExportOptions) -> Self {
        self.export = Some(options);
        self
    }

    /// Validate the configuration and freeze it.
    pub fn build(self) -> Result<Grid<E>, GridError> {
        let query_fn = self.query_fn.ok_or(GridError::MissingQueryFn)?;
        self.defaults.check()?;

        if self.filterables.iter().any(|(name, _)| name.is_empty()) {
            return Err(GridError::EmptyName("filterable"));
        }
        if self.sortables.iter().any(|(name, _)| name.is_empty()) {
            return Err(GridError::EmptyName("sortable"));
        }
        if let Some(export) = &self.export {
            if export.fields.is_empty() {
                return Err(GridError::EmptyExportFields);
            }
            if export.fields.iter().any(|f| f.value.is_empty()) {
                return Err(GridError::EmptyName("export field"));
            }
        }

        Ok(Grid {
            defaults: self.defaults,
            query_fn,
            searchables: self.searchables,
            filterables: self.filterables,
            sortables: self.sortables,
            export: self.export,
        })
    }
}

fn upsert<T>(entries: &mut Vec<(String, T)>, name: String, value: T) {
    match entries.iter_mut().find(|(existing, _)| *existing == name) {
        Some(entry) => entry.1 = value,
        None => entries.push((name, value)),
    }
}

/// A query constrained by one request, with the state it was built from
pub struct Prepared<E: EntityTrait> {
    pub query: Select<E>,
    pub state: GridState,
}

/// Immutable grid configuration of one endpoint.
///
/// Shared between requests; every call validates its own parameters and
/// builds a fresh query.
pub struct Grid<E: EntityTrait> {
    defaults: GridDefaults,
    query_fn: QueryFn<E>,
    searchables: Vec<Searchable<E>>,
    filterables: Vec<(String, Filterable<E>)>,
    sortables: Vec<(String, Sortable<E>)>,
    export: Option<ExportOptions>,
}

impl<E: EntityTrait> Grid<E> {
    pub fn defaults(&self) -> &GridDefaults {
        &self.defaults
    }

    pub fn export_options(&self) -> Option<&ExportOptions> {
        self.export.as_ref()
    }

    fn filterable(&self, name: &str) -> Option<&Filterable<E>> {
        self.filterables
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, f)| f)
    }

    fn sortable(&self, name: &str) -> Option<&Sortable<E>> {
        self.sortables
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, s)| s)
    }

    /// Read the grid parameters from `params` under their configured names
    /// and normalize them.
    pub fn state(&self, params: &RequestParams) -> GridState {
        let names = &self.defaults.query_params;
        let params = params.only(&names.all());

        let page = validate_page(params.get(&names.page), self.defaults.page);
        let per_page = validate_per_page(
            params.get(&names.per_page),
            self.defaults.per_page,
            self.defaults.per_page_limit,
        );
        let search = validate_search(params.get(&names.search), &self.defaults.search);

        let mut filters = validate_filters(params.get(&names.filter), &self.defaults.filters);
        filters.retain(|name, _| self.filterable(name).is_some());

        let sorts = parse_sorts(&validate_sorts(
            params.get(&names.sort),
            &self.defaults.sorts,
        ))
        .into_iter()
        .filter(|key| self.sortable(&key.field).is_some())
        .collect();

        GridState {
            page,
            per_page,
            search,
            filters,
            sorts,
        }
    }

    /// Build the constrained query: search, then filters, then sorts.
    pub fn make(&self, params: &RequestParams) -> Prepared<E> {
        let state = self.state(params);
        debug!(
            "Grid request: page={} per_page={} search={:?} filters={:?} sorts={:?}",
            state.page, state.per_page, state.search, state.filters, state.sorts
        );

        let query = (self.query_fn)();
        let query = self.apply_search(query, &state);
        let query = self.apply_filters(query, &state);
        let query = self.apply_sorts(query, &state);

        Prepared { query, state }
    }

    /// One OR group over all searchables.
    pub fn apply_search(&self, query: Select<E>, state: &GridState) -> Select<E> {
        if state.search.is_empty() || self.searchables.is_empty() {
            return query;
        }

        let group = self
            .searchables
            .iter()
            .fold(Condition::any(), |group, searchable| match searchable {
                Searchable::Column(col) => group.add(col.contains(state.search.as_str())),
                Searchable::Custom(f) => f(group, &state.search),
            });
        query.filter(group)
    }

    /// One AND group over the submitted filterables.
    pub fn apply_filters(&self, query: Select<E>, state: &GridState) -> Select<E> {
        if state.filters.is_empty() || self.filterables.is_empty() {
            return query;
        }

        let group = self
            .filterables
            .iter()
            .filter_map(|(name, filterable)| {
                state.filters.get(name).map(|value| (filterable, value))
            })
            .fold(Condition::all(), |group, (filterable, value)| match filterable {
                Filterable::Column(col) => group.add(col.eq(value.as_str())),
                Filterable::Custom(f) => f(group, value),
            });
        query.filter(group)
    }

    /// Order by each requested key, left to right.
    pub fn apply_sorts(&self, query: Select<E>, state: &GridState) -> Select<E> {
        if state.sorts.is_empty() || self.sortables.is_empty() {
            return query;
        }

        state.sorts.iter().fold(query, |query, key| {
            match self.sortable(&key.field) {
                Some(Sortable::Column(col)) => query.order_by(*col, key.direction.into()),
                Some(Sortable::Custom(f)) => f(query, key),
                None => query,
            }
        })
    }

    /// Fetch the requested page as entity models.
    pub async fn paginate<C>(
        &self,
        db: &C,
        params: &RequestParams,
    ) -> AppResult<PaginatedResult<E::Model>>
    where
        C: ConnectionTrait,
        E::Model: Sync,
    {
        metrics::counter!("datagrid_queries_total", "mode" => "paginate").increment(1);
        let Prepared { query, state } = self.make(params);

        let total = query.clone().count(db).await?;
        let items = query
            .offset(state.offset())
            .limit(state.per_page)
            .all(db)
            .await?;

        Ok(PaginatedResult::new(items, total, state.page, state.per_page))
    }

    /// Fetch the requested page as JSON objects.
    pub async fn paginate_json<C>(
        &self,
        db: &C,
        params: &RequestParams,
    ) -> AppResult<PaginatedResult<Value>>
    where
        C: ConnectionTrait,
        E::Model: Sync,
    {
        metrics::counter!("datagrid_queries_total", "mode" => "paginate").increment(1);
        let Prepared { query, state } = self.make(params);

        let total = query.clone().count(db).await?;
        let items = query
            .offset(state.offset())
            .limit(state.per_page)
            .into_json()
            .all(db)
            .await?;

        Ok(PaginatedResult::new(items, total, state.page, state.per_page))
    }

    /// Fetch every matching row, ignoring pagination, and render it as CSV.
    pub async fn export<C>(&self, db: &C, params: &RequestParams) -> AppResult<String>
    where
        C: ConnectionTrait,
    {
        let options = self.export.as_ref().ok_or(GridError::MissingExportOptions)?;
        metrics::counter!("datagrid_queries_total", "mode" => "export").increment(1);

        let Prepared { query, .. } = self.make(params);
        let rows = query.into_json().all(db).await?;
        debug!("Exporting {} grid rows", rows.len());

        rows_to_csv(&options.fields, &rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::grid::{PerPageLimit, SortDirection};
    use crate::infrastructure::database::entities::user;
    use crate::infrastructure::database::{migrator::Migrator, seed::seed_demo_users};
    use sea_orm::{Database, DatabaseConnection, DbBackend, QueryTrait};
    use sea_orm_migration::MigratorTrait;
    use serde_json::json;

    fn sql(query: Select<user::Entity>) -> String {
        query.build(DbBackend::Sqlite).to_string()
    }

    fn base() -> GridBuilder<user::Entity> {
        GridBuilder::new(GridDefaults::default()).query(user::Entity::find)
    }

    fn users_grid() -> Grid<user::Entity> {
        base()
            .searchable(Searchable::Column(user::Column::Username))
            .searchable(Searchable::Column(user::Column::Email))
            .filterable("role", Filterable::Column(user::Column::Role))
            .filterable(
                "min_age",
                Filterable::custom(|group, value| match value.parse::<i32>() {
                    Ok(age) => group.add(user::Column::Age.gte(age)),
                    Err(_) => group,
                }),
            )
            .sortable("age", Sortable::Column(user::Column::Age))
            .sortable("name", Sortable::Column(user::Column::Username))
            .export_options(ExportOptions::new(["username", "age"]))
            .build()
            .unwrap()
    }

    async fn seeded_db() -> DatabaseConnection {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        seed_demo_users(&db).await.unwrap();
        db
    }

    // ── Setup ──────────────────────────────────────────────────

    #[test]
    fn build_without_query_fn_fails_fast() {
        let err = GridBuilder::<user::Entity>::new(GridDefaults::default())
            .searchable(Searchable::Column(user::Column::Email))
            .build()
            .err();
        assert_eq!(err, Some(GridError::MissingQueryFn));
    }

    #[test]
    fn build_rejects_bad_defaults() {
        let err = base()
            .defaults(DefaultsOverride {
                per_page_limit: Some(PerPageLimit::new(20, 10)),
                ..Default::default()
            })
            .build()
            .err();
        assert!(matches!(err, Some(GridError::InvalidDefaults(_))));
    }

    #[test]
    fn build_rejects_empty_names_and_export_fields() {
        let err = base()
            .sortable("", Sortable::Column(user::Column::Age))
            .build()
            .err();
        assert_eq!(err, Some(GridError::EmptyName("sortable")));

        let err = base()
            .export_options(ExportOptions::default())
            .build()
            .err();
        assert_eq!(err, Some(GridError::EmptyExportFields));
    }

    #[test]
    fn repeated_names_replace_earlier_entries() {
        let grid = base()
            .sortable("age", Sortable::Column(user::Column::Username))
            .sortable("age", Sortable::Column(user::Column::Age))
            .build()
            .unwrap();
        let params = RequestParams::new().with("sort", "age");
        let sql = sql(grid.make(&params).query);
        assert!(sql.ends_with(r#"ORDER BY "users"."age" ASC"#), "{sql}");
    }

    // ── State ──────────────────────────────────────────────────

    #[test]
    fn state_normalizes_garbage() {
        let grid = users_grid();
        let params = RequestParams::new()
            .with("page", "zero")
            .with("perPage", "1000")
            .with("search", "  50%_ ")
            .with("filter", "not-an-object")
            .with("sort", "-age,unknown,name");
        let state = grid.state(&params);
        assert_eq!(state.page, 1);
        assert_eq!(state.per_page, 100);
        assert_eq!(state.search, "50  ");
        assert!(state.filters.is_empty());
        assert_eq!(
            state.sorts.iter().map(|k| (k.field.as_str(), k.direction)).collect::<Vec<_>>(),
            vec![("age", SortDirection::Desc), ("name", SortDirection::Asc)]
        );
    }

    #[test]
    fn state_drops_unknown_filters() {
        let grid = users_grid();
        let params =
            RequestParams::new().with("filter", json!({"role": "admin", "password": "x"}));
        let state = grid.state(&params);
        assert_eq!(state.filters.len(), 1);
        assert_eq!(state.filters["role"], "admin");
    }

    #[test]
    fn state_uses_configured_param_names() {
        let mut names = GridDefaults::default().query_params;
        names.per_page = "limit".into();
        names.search = "q".into();
        let grid = base()
            .searchable(Searchable::Column(user::Column::Email))
            .defaults(DefaultsOverride {
                query_params: Some(names),
                ..Default::default()
            })
            .build()
            .unwrap();

        let params = RequestParams::new()
            .with("limit", "10")
            .with("q", "ann")
            .with("perPage", "50");
        let state = grid.state(&params);
        assert_eq!(state.per_page, 10);
        assert_eq!(state.search, "ann");
    }

    // ── Clauses ────────────────────────────────────────────────

    #[test]
    fn search_is_one_or_group() {
        let grid = users_grid();
        let sql = sql(grid.make(&RequestParams::new().with("search", "ann")).query);
        assert!(
            sql.contains(r#""users"."username" LIKE '%ann%' OR "users"."email" LIKE '%ann%'"#),
            "{sql}"
        );
    }

    #[test]
    fn empty_search_adds_no_clause() {
        let grid = users_grid();
        let sql = sql(grid.make(&RequestParams::new().with("search", "   ")).query);
        assert!(!sql.contains("WHERE"), "{sql}");
    }

    #[test]
    fn custom_searchable_receives_text() {
        let grid = base()
            .searchable(Searchable::custom(|group, text| {
                group.add(user::Column::FullName.starts_with(text))
            }))
            .build()
            .unwrap();
        let sql = sql(grid.make(&RequestParams::new().with("search", "Jo")).query);
        assert!(sql.contains(r#""users"."full_name" LIKE 'Jo%'"#), "{sql}");
    }

    #[test]
    fn filters_are_one_and_group() {
        let grid = users_grid();
        let params =
            RequestParams::new().with("filter", json!({"role": "admin", "min_age": "30"}));
        let sql = sql(grid.make(&params).query);
        assert!(
            sql.contains(r#""users"."role" = 'admin' AND "users"."age" >= 30"#),
            "{sql}"
        );
    }

    #[test]
    fn unknown_filter_keys_add_no_clause() {
        let grid = users_grid();
        let params = RequestParams::new().with("filter", json!({"password": "secret"}));
        let sql = sql(grid.make(&params).query);
        assert!(!sql.contains("WHERE"), "{sql}");
    }

    #[test]
    fn sorts_apply_left_to_right() {
        let grid = users_grid();
        let sql = sql(grid.make(&RequestParams::new().with("sort", "-age,name")).query);
        assert!(
            sql.ends_with(r#"ORDER BY "users"."age" DESC, "users"."username" ASC"#),
            "{sql}"
        );
    }

    #[test]
    fn unknown_sort_tokens_are_skipped() {
        let grid = users_grid();
        let sql = sql(grid.make(&RequestParams::new().with("sort", "-password")).query);
        assert!(!sql.contains("ORDER BY"), "{sql}");
    }

    #[test]
    fn custom_sortable_receives_direction() {
        let grid = base()
            .sortable(
                "name",
                Sortable::custom(|query, key| {
                    query
                        .order_by(user::Column::FullName, key.direction.into())
                        .order_by(user::Column::Username, key.direction.into())
                }),
            )
            .build()
            .unwrap();
        let sql = sql(grid.make(&RequestParams::new().with("sort", "-name")).query);
        assert!(
            sql.ends_with(r#"ORDER BY "users"."full_name" DESC, "users"."username" DESC"#),
            "{sql}"
        );
    }

    #[test]
    fn default_sort_applies_when_none_requested() {
        let grid = base()
            .sortable("age", Sortable::Column(user::Column::Age))
            .defaults(DefaultsOverride {
                sorts: Some("-age".into()),
                ..Default::default()
            })
            .build()
            .unwrap();
        let sql = sql(grid.make(&RequestParams::new()).query);
        assert!(sql.ends_with(r#"ORDER BY "users"."age" DESC"#), "{sql}");
    }

    // ── Execution ──────────────────────────────────────────────

    #[tokio::test]
    async fn paginate_returns_requested_slice() {
        let db = seeded_db().await;
        let grid = users_grid();

        let params = RequestParams::new()
            .with("page", "2")
            .with("perPage", "5")
            .with("sort", "name");
        let result = grid.paginate(&db, &params).await.unwrap();

        assert_eq!(result.total, 12);
        assert_eq!(result.page, 2);
        assert_eq!(result.limit, 5);
        assert_eq!(result.total_pages, 3);
        assert_eq!(result.items.len(), 5);

        let all = grid
            .paginate(&db, &RequestParams::new().with("sort", "name"))
            .await
            .unwrap();
        let expected: Vec<_> = all.items[5..10].iter().map(|u| u.username.clone()).collect();
        let got: Vec<_> = result.items.iter().map(|u| u.username.clone()).collect();
        assert_eq!(got, expected);
    }

    #[tokio::test]
    async fn paginate_far_past_the_end_is_empty() {
        let db = seeded_db().await;
        let grid = users_grid();

        for page in ["99999999999999999999", "400000000000000000"] {
            let result = grid
                .paginate(&db, &RequestParams::new().with("page", page))
                .await
                .unwrap();
            assert_eq!(result.total, 12);
            assert!(result.items.is_empty(), "page {page}");
        }
    }

    #[tokio::test]
    async fn paginate_applies_filters() {
        let db = seeded_db().await;
        let grid = users_grid();

        let params = RequestParams::new().with("filter", json!({"role": "admin"}));
        let result = grid.paginate(&db, &params).await.unwrap();
        assert!(result.total > 0);
        assert!(result
            .items
            .iter()
            .all(|u| u.role == user::UserRole::Admin));
    }

    #[tokio::test]
    async fn paginate_json_returns_objects() {
        let db = seeded_db().await;
        let grid = users_grid();

        let params = RequestParams::new().with("search", "alice");
        let result = grid.paginate_json(&db, &params).await.unwrap();
        assert_eq!(result.total, 1);
        assert_eq!(result.items[0]["username"], "alice");
    }

    #[tokio::test]
    async fn export_ignores_pagination() {
        let db = seeded_db().await;
        let grid = users_grid();

        let params = RequestParams::new()
            .with("perPage", "5")
            .with("sort", "-age");
        let csv = grid.export(&db, &params).await.unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], "username,age");
        assert_eq!(lines.len(), 13);

        let ages: Vec<i64> = lines[1..]
            .iter()
            .map(|line| line.split(',').nth(1).unwrap().parse().unwrap())
            .collect();
        assert!(ages.windows(2).all(|w| w[0] >= w[1]));
    }

    #[tokio::test]
    async fn export_without_options_is_a_setup_error() {
        let db = seeded_db().await;
        let grid = base().build().unwrap();
        let err = grid.export(&db, &RequestParams::new()).await.unwrap_err();
        assert!(matches!(
            err,
            crate::shared::AppError::Grid(GridError::MissingExportOptions)
        ));
    }
}
