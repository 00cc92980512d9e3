pub const DDL: &str = r#"
CREATE TABLE IF NOT EXISTS prompts (
  id TEXT PRIMARY KEY,
  scenario TEXT NOT NULL,
  length_bin TEXT NOT NULL,
  variant_of TEXT,
  text TEXT NOT NULL,
  source TEXT,
  token_count INTEGER,
  created_at TEXT
);

CREATE TABLE IF NOT EXISTS runs (
  id TEXT PRIMARY KEY,
  prompt_id TEXT NOT NULL,
  model TEXT NOT NULL,
  status TEXT NOT NULL,
  prompt_length_bin TEXT,
  input_tokens INTEGER NOT NULL DEFAULT 0,
  output_tokens INTEGER NOT NULL DEFAULT 0,
  total_tokens INTEGER NOT NULL DEFAULT 0,
  aud_cost REAL NOT NULL DEFAULT 0,
  economics_json TEXT,
  scores_json TEXT,
  prompt_ref_json TEXT,
  experiment TEXT,
  scenario TEXT NOT NULL,
  source TEXT,
  created_at TEXT
);

CREATE TABLE IF NOT EXISTS imports (
  id INTEGER PRIMARY KEY AUTOINCREMENT,
  path TEXT NOT NULL,
  fingerprint TEXT NOT NULL,
  prompts INTEGER NOT NULL DEFAULT 0,
  runs INTEGER NOT NULL DEFAULT 0,
  imported_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_prompts_variant_of ON prompts(variant_of);
CREATE INDEX IF NOT EXISTS idx_runs_prompt_id ON runs(prompt_id);
CREATE INDEX IF NOT EXISTS idx_runs_status ON runs(status);
"#;
