//! Master/detail example - a paginated account list driving a breakdown view.
//!
//! A simulated gateway serves 45 accounts in pages of 20 plus a per-account
//! holdings breakdown. The master view pages and filters the list; selecting
//! an account re-keys the detail binding.

use std::fs::File;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use girder::column::{Column, ColumnModel};
use girder::content::Content;
use girder::grid::{Grid, GridOutput};
use girder::view::{DetailView, MasterView};
use girder_query::{ArgValue, QueryError, QueryExecutor, QueryKey};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use simplelog::{Config, WriteLogger};

const TOTAL_ACCOUNTS: usize = 45;

#[derive(Debug, Clone, Deserialize, Serialize)]
struct Account {
    id: String,
    name: String,
    region: String,
}

#[derive(Debug, Clone, Deserialize)]
struct Breakdown {
    account_id: String,
    scope: String,
    total: f64,
}

/// Simulated gateway with a small network delay.
struct SimulatedGateway {
    accounts: Vec<Account>,
}

impl SimulatedGateway {
    fn new() -> Arc<Self> {
        let accounts = (0..TOTAL_ACCOUNTS)
            .map(|i| Account {
                id: format!("acc-{i:03}"),
                name: format!("Account {i:03}"),
                region: if i % 2 == 0 { "north" } else { "south" }.to_string(),
            })
            .collect();
        Arc::new(Self { accounts })
    }
}

#[async_trait]
impl QueryExecutor for SimulatedGateway {
    async fn execute(&self, key: &QueryKey) -> Result<Value, QueryError> {
        tokio::time::sleep(Duration::from_millis(50)).await;
        match key.operation() {
            "accounts" => {
                let page = match key.get("page") {
                    Some(ArgValue::Int(i)) => *i as usize,
                    _ => 1,
                };
                let size = match key.get("size") {
                    Some(ArgValue::Int(i)) => *i as usize,
                    _ => 20,
                };
                let items: Vec<Value> = self
                    .accounts
                    .iter()
                    .skip((page - 1) * size)
                    .take(size)
                    .map(|a| serde_json::to_value(a).unwrap())
                    .collect();
                Ok(json!({
                    "items": items,
                    "total": self.accounts.len(),
                    "page": page,
                    "size": size,
                    "total_pages": self.accounts.len().div_ceil(size),
                    "aggregate": 12_500_000.0,
                }))
            }
            "holdings" => {
                let id = match key.get("primary_id") {
                    Some(ArgValue::Str(s)) => s.clone(),
                    _ => return Err(QueryError::service(400, "primary_id required")),
                };
                let scope = match key.get("secondary_filter") {
                    Some(ArgValue::Str(s)) => s.clone(),
                    _ => "all".to_string(),
                };
                Ok(json!({
                    "account_id": id,
                    "scope": scope,
                    "total": 250_000.0,
                }))
            }
            op => Err(QueryError::service(404, format!("unknown operation {op}"))),
        }
    }
}

fn print_output(output: &GridOutput<String>) {
    match output {
        GridOutput::Loading { placeholder } => println!("  [{placeholder}]"),
        GridOutput::Failed { error, placeholder } => {
            println!("  [{placeholder}] ({error})");
        }
        GridOutput::Empty { placeholder } => println!("  [{placeholder}]"),
        GridOutput::Rows(rows) => {
            for row in rows {
                let marker = if row.selected { ">" } else { " " };
                let cells: Vec<String> = row.cells.iter().map(|c| c.content.to_string()).collect();
                println!("  {marker} {}", cells.join("  |  "));
            }
        }
    }
}

async fn settle(view: &mut MasterView<Account, String>) -> GridOutput<String> {
    loop {
        let output = view.recompute();
        if !matches!(output, GridOutput::Loading { .. }) {
            return output;
        }
        view.binding().changed().await;
    }
}

#[tokio::main]
async fn main() {
    if let Ok(log_file) = File::create("master_detail.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, Config::default(), log_file);
    }

    let gateway = SimulatedGateway::new();

    let columns = ColumnModel::new(vec![
        Column::new("name", "Name", |a: &Account, _| Content::text(&a.name)),
        Column::new("region", "Region", |a: &Account, _| Content::text(&a.region)),
    ])
    .expect("column keys are unique");
    let grid = Grid::new(columns, |a: &Account| a.id.clone())
        .empty_placeholder("No accounts match")
        .failure_placeholder("Could not load accounts");

    let mut view = MasterView::new("accounts", gateway.clone(), grid, |a: &Account| {
        vec![a.name.clone(), a.region.clone()]
    });
    let detail: DetailView<Breakdown> = DetailView::new("holdings", gateway);

    println!("Page 1:");
    print_output(&settle(&mut view).await);
    println!(
        "  ({} accounts, {} pages, {:.2} under management)",
        view.window().total(),
        view.window().total_pages(),
        view.aggregate().unwrap_or_default()
    );

    println!("\nPage 2:");
    view.set_page(2);
    print_output(&settle(&mut view).await);

    println!("\nSearch \"Account 02\" on the loaded page:");
    view.set_search_term("Account 02");
    print_output(&view.recompute());

    println!("\nSelect acc-021:");
    view.set_search_term("");
    view.select("acc-021".to_string());
    print_output(&view.recompute());

    println!("\nBreakdown for the selection:");
    let breakdown = loop {
        let entry = detail.recompute(view.selected_id().as_deref());
        if let Some(value) = entry.state().as_success() {
            break value.clone();
        }
        detail.binding().changed().await;
    };
    println!(
        "  {} ({}): {:.2}",
        breakdown.account_id, breakdown.scope, breakdown.total
    );
}
