use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tabled::{Table, Tabled};
use tracing::debug;

use crate::cli::{Cli, OutputFormat};
use crate::state::{StateSnapshot, StateStore, StateStoreError};
use crate::table_theme::{EmojiFormatter, TableTheme};

/// Models specific to the get command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusInfo {
    pub kind: String,
    pub name: String,
    pub state: Option<String>,
    pub resource_version: Option<String>,
    pub created: Option<DateTime<Utc>>,
}

impl StatusInfo {
    pub fn from_snapshot(kind: &str, snapshot: StateSnapshot) -> Self {
        Self {
            kind: kind.to_string(),
            name: snapshot.name,
            state: snapshot.state.map(String::from),
            resource_version: snapshot.resource_version,
            created: snapshot.created,
        }
    }

    fn state_or_none(&self) -> String {
        self.state.clone().unwrap_or_else(|| "<none>".to_string())
    }
}

fn format_age_from_datetime(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    if duration.num_days() > 0 {
        format!("{}d", duration.num_days())
    } else if duration.num_hours() > 0 {
        format!("{}h", duration.num_hours())
    } else if duration.num_minutes() > 0 {
        format!("{}m", duration.num_minutes())
    } else {
        format!("{}s", duration.num_seconds())
    }
}

fn format_age_from_option(age: Option<DateTime<Utc>>) -> String {
    match age {
        Some(timestamp) => format_age_from_datetime(timestamp),
        None => "<unknown>".to_string(),
    }
}

#[derive(Tabled)]
struct StatusTableRow {
    name: String,
    state: String,
    age: String,
}

#[derive(Tabled)]
struct StatusWideTableRow {
    name: String,
    state: String,
    #[tabled(rename = "resource version")]
    resource_version: String,
    age: String,
}

/// Fetch one object and describe its status.
pub async fn get_status(store: &dyn StateStore, name: &str) -> Result<StatusInfo, StateStoreError> {
    let kind = store.kind();
    let snapshot = store.fetch(name).await?;
    debug!("Fetched {} {} at resource version {:?}", kind, name, snapshot.resource_version);

    Ok(StatusInfo::from_snapshot(&kind.to_string(), snapshot))
}

/// Render a status in the requested format
pub fn render_status(info: &StatusInfo, format: OutputFormat, emoji: bool) -> Result<String> {
    let rendered = match format {
        OutputFormat::Text => format!("{} {}, status: {}", info.kind, info.name, info.state_or_none()),
        OutputFormat::Table => {
            let row = StatusTableRow {
                name: info.name.clone(),
                state: info.state_or_none(),
                age: format_age_from_option(info.created),
            };
            let mut table = TableTheme::apply_default(Table::new([row]));
            if emoji {
                table = EmojiFormatter::apply_to_column(table, 1);
            }
            table.to_string()
        }
        OutputFormat::Wide => {
            let row = StatusWideTableRow {
                name: info.name.clone(),
                state: info.state_or_none(),
                resource_version: info
                    .resource_version
                    .clone()
                    .unwrap_or_else(|| "<none>".to_string()),
                age: format_age_from_option(info.created),
            };
            let mut table = TableTheme::apply_wide(Table::new([row]));
            if emoji {
                table = EmojiFormatter::apply_to_column(table, 1);
            }
            table.to_string()
        }
        OutputFormat::Json => serde_json::to_string_pretty(info)?,
        OutputFormat::Yaml => serde_yaml::to_string(info)?.trim_end().to_string(),
    };

    Ok(rendered)
}

/// Handle the get action for one resource kind
pub async fn handle_get_command(store: &dyn StateStore, name: &str, cli: &Cli) -> Result<()> {
    let info = get_status(store, name).await?;
    println!("{}", render_status(&info, cli.output, cli.emoji)?);
    Ok(())
}
