use chrono::{DateTime, Duration, TimeZone, Utc};
use idle_scan::{
    Result, ScanError,
    handlers::scan_and_report,
    report::{COLUMNS, NEVER, ReportRow},
    scan::{
        CacheGroup, Inventory, MetricQuery, MetricSample, MetricSource, ProfileConnector,
        ResourceActivity, ResourceKind, ScanOptions, ScanWindow,
    },
};
use std::collections::HashMap;
use tempfile::TempDir;

// End-to-end scan over in-memory accounts: enumerate, resolve, classify,
// write the CSV and read it back.

#[derive(Clone, Default)]
struct Account {
    groups: Vec<CacheGroup>,
    tables: Vec<String>,
    clusters: Vec<String>,
    /// (metric, dimension) -> samples
    series: HashMap<(String, String), Vec<MetricSample>>,
    broken: bool,
}

struct AccountInventory(Account);
struct AccountMetrics(Account);

impl Inventory for AccountInventory {
    async fn cache_groups(&self) -> Result<Vec<CacheGroup>> {
        Ok(self.0.groups.clone())
    }

    async fn tables(&self) -> Result<Vec<String>> {
        Ok(self.0.tables.clone())
    }

    async fn document_clusters(&self) -> Result<Vec<String>> {
        if self.0.broken {
            return Err(ScanError::Aws {
                operation: "DescribeDBClusters",
                message: "ExpiredToken".to_string(),
            });
        }
        Ok(self.0.clusters.clone())
    }
}

impl MetricSource for AccountMetrics {
    async fn fetch_series(&self, query: &MetricQuery, _: &ScanWindow) -> Result<Vec<MetricSample>> {
        let key = (query.metric_name.to_string(), query.dimension_value.clone());
        Ok(self.0.series.get(&key).cloned().unwrap_or_default())
    }
}

struct Accounts(HashMap<String, Account>);

impl ProfileConnector for Accounts {
    type Inventory = AccountInventory;
    type Metrics = AccountMetrics;

    async fn connect(&self, profile: &str) -> Result<(AccountInventory, AccountMetrics)> {
        let account = self.0.get(profile).cloned().unwrap_or_default();
        Ok((AccountInventory(account.clone()), AccountMetrics(account)))
    }
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 16, 8, 30, 0).unwrap()
}

fn days_ago(days: i64) -> DateTime<Utc> {
    now() - Duration::days(days)
}

fn accounts() -> Accounts {
    let mut prod = Account {
        groups: vec![CacheGroup {
            id: "sessions".to_string(),
            member_clusters: vec!["sessions-001".to_string()],
        }],
        tables: vec!["orders".to_string(), "audit-2019".to_string()],
        clusters: vec!["catalog".to_string()],
        ..Default::default()
    };
    prod.series.insert(
        ("CurrConnections".to_string(), "sessions-001".to_string()),
        vec![
            MetricSample::new(days_ago(0), 0.0),
            MetricSample::new(days_ago(120), 4.0),
        ],
    );
    prod.series.insert(
        ("ConsumedWriteCapacityUnits".to_string(), "orders".to_string()),
        vec![MetricSample::new(days_ago(3), 12.0)],
    );
    prod.series.insert(
        ("ConsumedReadCapacityUnits".to_string(), "orders".to_string()),
        vec![MetricSample::new(days_ago(150), 1.0)],
    );
    prod.series.insert(
        ("DatabaseConnections".to_string(), "catalog".to_string()),
        vec![MetricSample::new(days_ago(89), 2.0)],
    );

    let legacy = Account {
        tables: vec!["never-read".to_string()],
        clusters: vec!["old-docs".to_string()],
        broken: true,
        ..Default::default()
    };

    let dev = Account {
        tables: vec!["scratch".to_string()],
        ..Default::default()
    };

    Accounts(HashMap::from([
        ("prod".to_string(), prod),
        ("legacy".to_string(), legacy),
        ("dev".to_string(), dev),
    ]))
}

#[tokio::test]
async fn test_scan_writes_only_inactive_resources() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("inactive.csv");
    let window = ScanWindow::ending_at(now(), 6);
    let profiles: Vec<String> = ["prod", "legacy", "dev"].iter().map(|p| p.to_string()).collect();

    let summary = scan_and_report(&profiles, &accounts(), &window, ScanOptions::default(), &output)
        .await
        .unwrap();

    // prod: sessions, orders, audit-2019, catalog; dev: scratch
    assert_eq!(summary.total_checked, 5);
    assert_eq!(summary.profiles_scanned, 2);
    assert_eq!(
        summary.inactive,
        vec![
            ResourceActivity::new("prod", ResourceKind::CacheGroup, "sessions", Some(days_ago(120))),
            ResourceActivity::new("prod", ResourceKind::TableStore, "audit-2019", None),
            ResourceActivity::new("dev", ResourceKind::TableStore, "scratch", None),
        ]
    );
    assert_eq!(summary.failures.len(), 1);
    assert_eq!(summary.failures[0].profile, "legacy");
    assert!(summary.failures[0].reason.contains("ExpiredToken"));

    let mut reader = csv::Reader::from_path(&output).unwrap();
    assert_eq!(reader.headers().unwrap().iter().collect::<Vec<_>>(), COLUMNS);
    let rows: Vec<ReportRow> = reader.deserialize().map(|r| r.unwrap()).collect();

    assert_eq!(rows.len(), summary.inactive.len());
    for (row, activity) in rows.iter().zip(&summary.inactive) {
        assert_eq!(row.profile, activity.profile);
        assert_eq!(row.resource_type, activity.resource_type.as_str());
        assert_eq!(row.identifier, activity.identifier);
        assert_eq!(row.checked_months, 6);
        match activity.last_activity {
            Some(ts) => assert_eq!(
                DateTime::parse_from_rfc3339(&row.last_activity_utc).unwrap(),
                ts
            ),
            None => assert_eq!(row.last_activity_utc, NEVER),
        }
    }
}

#[tokio::test]
async fn test_all_profiles_failing_still_writes_header() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("inactive.csv");
    let window = ScanWindow::ending_at(now(), 3);
    let broken = Accounts(HashMap::from([(
        "legacy".to_string(),
        Account {
            broken: true,
            ..Default::default()
        },
    )]));

    let summary = scan_and_report(&["legacy".to_string()], &broken, &window, ScanOptions::default(), &output)
        .await
        .unwrap();

    assert!(summary.inactive.is_empty());
    assert_eq!(summary.total_checked, 0);
    assert_eq!(summary.profiles_scanned, 0);
    let contents = std::fs::read_to_string(&output).unwrap();
    assert_eq!(contents.trim_end(), COLUMNS.join(","));
}

#[tokio::test]
async fn test_unwritable_report_is_an_error() {
    let dir = TempDir::new().unwrap();
    // A directory cannot be opened as the report file
    let output = dir.path().to_path_buf();
    let window = ScanWindow::ending_at(now(), 6);

    let result = scan_and_report(&["dev".to_string()], &accounts(), &window, ScanOptions::default(), &output).await;
    assert!(matches!(result, Err(ScanError::Io(_))));
}
