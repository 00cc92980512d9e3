use crate::model::{Economics, LengthBin, Prompt, Run, RunStatus, Scenario, TokenUsage};
use crate::providers::{PromptFilter, PromptSource, RunFilter, RunSource};
use anyhow::Context;
use async_trait::async_trait;
use rusqlite::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct Store {
    pub conn: Arc<Mutex<Connection>>,
}

impl Store {
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create db directory {}", parent.display()))?;
            }
        }
        let conn = Connection::open(path).context("failed to open sqlite db")?;
        conn.execute("PRAGMA foreign_keys = ON", [])?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn memory() -> anyhow::Result<Self> {
        // SQLite in-memory DB
        let conn = Connection::open_in_memory().context("failed to open in-memory sqlite db")?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn init_schema(&self) -> anyhow::Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute_batch(crate::storage::schema::DDL)?;
        Ok(())
    }

    pub fn insert_prompt(&self, p: &Prompt) -> anyhow::Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT OR REPLACE INTO prompts
               (id, scenario, length_bin, variant_of, text, source, token_count, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            rusqlite::params![
                p.id,
                p.scenario.as_str(),
                p.length_bin.as_str(),
                p.variant_of,
                p.text,
                p.source,
                p.token_count.map(|t| t as i64),
                p.created_at,
            ],
        )
        .with_context(|| format!("failed to insert prompt {}", p.id))?;
        Ok(())
    }

    pub fn insert_run(&self, r: &Run) -> anyhow::Result<()> {
        let economics_json = if r.economics.extra.is_empty() {
            None
        } else {
            Some(serde_json::to_string(&r.economics.extra)?)
        };
        let scores_json = r.scores.as_ref().map(serde_json::to_string).transpose()?;
        let prompt_ref_json = r.prompt.as_ref().map(serde_json::to_string).transpose()?;

        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT OR REPLACE INTO runs
               (id, prompt_id, model, status, prompt_length_bin,
                input_tokens, output_tokens, total_tokens, aud_cost,
                economics_json, scores_json, prompt_ref_json,
                experiment, scenario, source, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)",
            rusqlite::params![
                r.id,
                r.prompt_id,
                r.model,
                r.status.as_str(),
                r.prompt_length_bin.as_ref().map(|b| b.as_str().to_string()),
                r.tokens.input as i64,
                r.tokens.output as i64,
                r.tokens.total as i64,
                r.economics.aud_cost,
                economics_json,
                scores_json,
                prompt_ref_json,
                r.experiment,
                r.scenario.as_str(),
                r.source,
                r.created_at,
            ],
        )
        .with_context(|| format!("failed to insert run {}", r.id))?;
        Ok(())
    }

    pub fn record_import(
        &self,
        path: &str,
        fingerprint: &str,
        prompts: usize,
        runs: usize,
    ) -> anyhow::Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO imports (path, fingerprint, prompts, runs, imported_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            rusqlite::params![
                path,
                fingerprint,
                prompts as i64,
                runs as i64,
                chrono::Utc::now().to_rfc3339(),
            ],
        )
        .context("failed to record import")?;
        Ok(())
    }

    pub fn list_prompts(&self, filter: &PromptFilter) -> anyhow::Result<Vec<Prompt>> {
        let (base_where, params) = prompt_filter_sql(filter);

        // With include_variants set, a matching base carries its variants
        // along even when they miss the filters themselves; the filter
        // params bind twice, once per occurrence of the clause.
        let (sql, params) = if filter.include_variants {
            let sql = format!(
                "SELECT id, scenario, length_bin, variant_of, text, source, token_count, created_at
                 FROM prompts
                 WHERE ({base_where})
                    OR (variant_of IS NOT NULL AND variant_of IN (
                          SELECT id FROM prompts WHERE ({base_where}) AND variant_of IS NULL))
                 ORDER BY rowid"
            );
            let (_, mut twice) = prompt_filter_sql(filter);
            let mut all = params;
            all.append(&mut twice);
            (sql, all)
        } else {
            let sql = format!(
                "SELECT id, scenario, length_bin, variant_of, text, source, token_count, created_at
                 FROM prompts
                 WHERE {base_where}
                 ORDER BY rowid"
            );
            (sql, params)
        };

        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(rusqlite::params_from_iter(params.iter()), |row| {
            let scenario_raw: String = row.get(1)?;
            let scenario = Scenario::parse(&scenario_raw).ok_or_else(|| {
                rusqlite::Error::FromSqlConversionFailure(
                    1,
                    rusqlite::types::Type::Text,
                    format!("unknown scenario: {scenario_raw}").into(),
                )
            })?;
            Ok(Prompt {
                id: row.get(0)?,
                scenario,
                length_bin: LengthBin::parse(&row.get::<_, String>(2)?),
                variant_of: row.get(3)?,
                text: row.get(4)?,
                source: row.get(5)?,
                token_count: row.get::<_, Option<i64>>(6)?.map(|t| t as u64),
                created_at: row.get(7)?,
            })
        })?;

        let mut prompts = Vec::new();
        for p in rows {
            prompts.push(p?);
        }
        Ok(prompts)
    }

    pub fn list_runs(&self, filter: &RunFilter) -> anyhow::Result<Vec<Run>> {
        let mut clauses = Vec::new();
        let mut params: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();
        if let Some(model) = &filter.model {
            clauses.push("model = ?");
            params.push(Box::new(model.clone()));
        }
        if let Some(scenario) = filter.scenario {
            clauses.push("scenario = ?");
            params.push(Box::new(scenario.as_str().to_string()));
        }
        if let Some(status) = filter.status {
            clauses.push("status = ?");
            params.push(Box::new(status.as_str().to_string()));
        }
        if let Some(source) = &filter.source {
            clauses.push("source = ?");
            params.push(Box::new(source.clone()));
        }
        if let Some(experiment) = &filter.experiment {
            clauses.push("experiment = ?");
            params.push(Box::new(experiment.clone()));
        }
        let where_sql = if clauses.is_empty() {
            "1=1".to_string()
        } else {
            clauses.join(" AND ")
        };

        let limit = filter.limit.max(1);
        let offset = (filter.page.max(1) - 1) as i64 * limit as i64;
        params.push(Box::new(limit as i64));
        params.push(Box::new(offset));

        let sql = format!(
            "SELECT id, prompt_id, model, status, prompt_length_bin,
                    input_tokens, output_tokens, total_tokens, aud_cost,
                    economics_json, scores_json, prompt_ref_json,
                    experiment, scenario, source, created_at
             FROM runs
             WHERE {where_sql}
             ORDER BY rowid
             LIMIT ? OFFSET ?"
        );

        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(rusqlite::params_from_iter(params.iter()), |row| {
            let scenario_raw: String = row.get(13)?;
            let scenario = Scenario::parse(&scenario_raw).ok_or_else(|| {
                rusqlite::Error::FromSqlConversionFailure(
                    13,
                    rusqlite::types::Type::Text,
                    format!("unknown scenario: {scenario_raw}").into(),
                )
            })?;

            let economics_extra: Option<String> = row.get(9)?;
            let economics = Economics {
                aud_cost: row.get(8)?,
                extra: economics_extra
                    .and_then(|s| serde_json::from_str(&s).ok())
                    .unwrap_or_default(),
            };
            let scores_json: Option<String> = row.get(10)?;
            let prompt_ref_json: Option<String> = row.get(11)?;

            Ok(Run {
                id: row.get(0)?,
                prompt_id: row.get(1)?,
                model: row.get(2)?,
                status: RunStatus::parse(&row.get::<_, String>(3)?),
                prompt_length_bin: row
                    .get::<_, Option<String>>(4)?
                    .map(|b| LengthBin::parse(&b)),
                tokens: TokenUsage {
                    input: row.get::<_, i64>(5)? as u64,
                    output: row.get::<_, i64>(6)? as u64,
                    total: row.get::<_, i64>(7)? as u64,
                },
                economics,
                scores: scores_json.and_then(|s| serde_json::from_str(&s).ok()),
                prompt: prompt_ref_json.and_then(|s| serde_json::from_str(&s).ok()),
                experiment: row.get(12)?,
                scenario,
                source: row.get(14)?,
                created_at: row.get(15)?,
            })
        })?;

        let mut runs = Vec::new();
        for r in rows {
            runs.push(r?);
        }
        Ok(runs)
    }
}

fn prompt_filter_sql(filter: &PromptFilter) -> (String, Vec<Box<dyn rusqlite::ToSql>>) {
    let mut clauses = Vec::new();
    let mut params: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();
    if let Some(scenario) = filter.scenario {
        clauses.push("scenario = ?");
        params.push(Box::new(scenario.as_str().to_string()));
    }
    if let Some(bin) = &filter.length_bin {
        clauses.push("length_bin = ?");
        params.push(Box::new(bin.as_str().to_string()));
    }
    if let Some(source) = &filter.source {
        clauses.push("source = ?");
        params.push(Box::new(source.clone()));
    }
    if let Some(query) = &filter.query {
        clauses.push("text LIKE ?");
        params.push(Box::new(format!("%{query}%")));
    }
    let where_sql = if clauses.is_empty() {
        "1=1".to_string()
    } else {
        clauses.join(" AND ")
    };
    (where_sql, params)
}

#[async_trait]
impl PromptSource for Store {
    async fn list(&self, filter: &PromptFilter) -> anyhow::Result<Vec<Prompt>> {
        self.list_prompts(filter)
    }
}

#[async_trait]
impl RunSource for Store {
    async fn list(&self, filter: &RunFilter) -> anyhow::Result<Vec<Run>> {
        self.list_runs(filter)
    }
}
