use stocklens_core::db::open_db_in_memory;
use stocklens_core::{RepoError, SqliteStockRepository, Stock, StockRepository};

fn stock(symbol: &str, name: &str, exchange: &str, sector: &str) -> Stock {
    Stock::new(symbol, name)
        .with_exchange(exchange)
        .with_sector(sector)
}

#[test]
fn insert_and_find_ignores_symbol_case() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteStockRepository::new(&conn);

    let apple = stock("AAPL", "Apple Inc.", "NASDAQ", "Technology");
    repo.insert_stock(&apple).unwrap();

    let loaded = repo.find_by_symbol_ignore_case("aapl").unwrap().unwrap();
    assert_eq!(loaded.symbol, "AAPL");
    assert_eq!(loaded.name, "Apple Inc.");
    assert_eq!(loaded.exchange.as_deref(), Some("NASDAQ"));
    assert_eq!(loaded.created_at, apple.created_at);
    assert_eq!(loaded.last_update, apple.last_update);

    assert!(repo.find_by_symbol_ignore_case("MSFT").unwrap().is_none());
}

#[test]
fn search_matches_symbol_or_name_substring_in_insertion_order() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteStockRepository::new(&conn);

    repo.insert_stock(&stock("MSFT", "Microsoft Corporation", "NASDAQ", "Technology"))
        .unwrap();
    repo.insert_stock(&stock("AAPL", "Apple Inc.", "NASDAQ", "Technology"))
        .unwrap();
    repo.insert_stock(&stock("APLE", "Apple Hospitality REIT", "NYSE", "Real Estate"))
        .unwrap();

    let symbols: Vec<String> = repo
        .search_by_symbol_or_name("APPLE")
        .unwrap()
        .into_iter()
        .map(|stock| stock.symbol)
        .collect();
    assert_eq!(symbols, vec!["AAPL", "APLE"]);

    let by_symbol = repo.search_by_symbol_or_name("sf").unwrap();
    assert_eq!(by_symbol.len(), 1);
    assert_eq!(by_symbol[0].symbol, "MSFT");

    assert!(repo.search_by_symbol_or_name("tesla").unwrap().is_empty());
}

#[test]
fn search_treats_like_wildcards_literally() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteStockRepository::new(&conn);
    repo.insert_stock(&Stock::new("BRK_B", "Berkshire Hathaway 100%"))
        .unwrap();
    repo.insert_stock(&Stock::new("BRKB", "Berkshire Class B")).unwrap();

    let underscore = repo.search_by_symbol_or_name("_").unwrap();
    assert_eq!(underscore.len(), 1);
    assert_eq!(underscore[0].symbol, "BRK_B");

    let percent = repo.search_by_symbol_or_name("%").unwrap();
    assert_eq!(percent.len(), 1);
}

#[test]
fn search_matches_non_ascii_names() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteStockRepository::new(&conn);
    repo.insert_stock(&stock("600519.SS", "贵州茅台", "SSE", "Consumer Goods"))
        .unwrap();

    let hits = repo.search_by_symbol_or_name("茅台").unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].symbol, "600519.SS");
}

#[test]
fn find_by_sector_is_exact_and_case_sensitive() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteStockRepository::new(&conn);

    repo.insert_stock(&stock("AAPL", "Apple Inc.", "NASDAQ", "Technology"))
        .unwrap();
    repo.insert_stock(&stock("MSFT", "Microsoft Corporation", "NASDAQ", "Technology"))
        .unwrap();
    repo.insert_stock(&stock("ORCL", "Oracle Corporation", "NYSE", "technology"))
        .unwrap();
    repo.insert_stock(&Stock::new("NOSEC", "No Sector Ltd.")).unwrap();

    let tech: Vec<String> = repo
        .find_by_sector("Technology")
        .unwrap()
        .into_iter()
        .map(|stock| stock.symbol)
        .collect();
    assert_eq!(tech, vec!["AAPL", "MSFT"]);

    assert!(repo.find_by_sector("Tech").unwrap().is_empty());
    assert!(repo.find_by_sector("").unwrap().is_empty());
}

#[test]
fn exists_and_count_reflect_store_contents() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteStockRepository::new(&conn);

    assert_eq!(repo.count().unwrap(), 0);
    assert!(!repo.exists_by_symbol_ignore_case("AAPL").unwrap());

    repo.insert_stock(&Stock::new("AAPL", "Apple Inc.")).unwrap();
    assert_eq!(repo.count().unwrap(), 1);
    assert!(repo.exists_by_symbol_ignore_case("AAPL").unwrap());
    assert!(repo.exists_by_symbol_ignore_case("aApL").unwrap());
    assert!(!repo.exists_by_symbol_ignore_case("").unwrap());
}

#[test]
fn insert_rejects_invalid_and_duplicate_stocks() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteStockRepository::new(&conn);

    let blank = Stock::new(" ", "Blank Symbol");
    assert!(matches!(
        repo.insert_stock(&blank).unwrap_err(),
        RepoError::Validation(_)
    ));

    repo.insert_stock(&Stock::new("AAPL", "Apple Inc.")).unwrap();
    assert!(matches!(
        repo.insert_stock(&Stock::new("aapl", "Apple Lowercase")).unwrap_err(),
        RepoError::Db(_)
    ));
}

#[test]
fn invalid_persisted_row_is_reported_not_masked() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteStockRepository::new(&conn);

    // Plants a row the model rejects.
    conn.execute_batch("PRAGMA ignore_check_constraints = ON;")
        .unwrap();
    conn.execute("INSERT INTO stocks (symbol, name) VALUES ('BAD', '   ');", [])
        .unwrap();

    let err = repo.find_by_symbol_ignore_case("BAD").unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(message) if message.contains("BAD")));
}

#[test]
fn search_folds_case_beyond_ascii() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteStockRepository::new(&conn);
    repo.insert_stock(&stock("ORSTED.CO", "Ørsted A/S", "CPH", "Utilities"))
        .unwrap();
    repo.insert_stock(&stock("NESN.SW", "Nestlé S.A.", "SIX", "Consumer Goods"))
        .unwrap();

    let orsted = repo.search_by_symbol_or_name("ørsted").unwrap();
    assert_eq!(orsted.len(), 1);
    assert_eq!(orsted[0].symbol, "ORSTED.CO");

    let nestle = repo.search_by_symbol_or_name("NESTLÉ").unwrap();
    assert_eq!(nestle.len(), 1);
    assert_eq!(nestle[0].symbol, "NESN.SW");
}

#[test]
fn symbol_lookup_and_uniqueness_fold_non_ascii_letters() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteStockRepository::new(&conn);
    repo.insert_stock(&Stock::new("ÆRØ", "Ærø Holding")).unwrap();

    let loaded = repo.find_by_symbol_ignore_case("ærø").unwrap().unwrap();
    assert_eq!(loaded.symbol, "ÆRØ");
    assert!(repo.exists_by_symbol_ignore_case("æRø").unwrap());

    assert!(matches!(
        repo.insert_stock(&Stock::new("ærø", "Ærø Duplicate")).unwrap_err(),
        RepoError::Db(_)
    ));
}
