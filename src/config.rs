//! アプリケーション設定管理モジュール
//! 探索エンジン、手番の操作主体、ログ出力などの設定を
//! 設定ファイルと環境変数から読み込んで管理する。

use serde::{Deserialize, Serialize};
use std::{env, fs, path::Path};

use crate::game::ControlType;

/// システムの制限値を定義する構造体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemLimits {
    /// 探索深度の下限
    pub min_search_depth: u8,
    /// 探索深度の上限
    pub max_search_depth: u8,
}

impl Default for SystemLimits {
    fn default() -> Self {
        Self {
            min_search_depth: 1,
            max_search_depth: 5,
        }
    }
}

/// 対局エンジンの設定
/// 探索深度と各プレイヤーの操作主体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    pub search_depth: u8,
    pub black: ControlType,
    pub white: ControlType,
}

impl Default for EngineConfig {
    /// 人間（黒）対コンピュータ（白）、深度3
    fn default() -> Self {
        Self {
            search_depth: 3,
            black: ControlType::Human,
            white: ControlType::Computer,
        }
    }
}

/// ログ出力の設定
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// tracing-subscriberのEnvFilter形式（例: "info", "reversi=debug"）
    pub level: String,
    pub with_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            with_target: false,
        }
    }
}

/// アプリケーションの全設定を統合するメイン設定構造体
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub system_limits: SystemLimits,
    pub engine: EngineConfig,
    pub logging: LoggingConfig,
}

/// 設定関連のエラーを表すenum
/// ファイル読み込み、パース、検証エラーなどを含む
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("設定ファイル読み込みエラー: {0}")]
    FileReadError(#[from] std::io::Error),

    #[error("設定ファイル解析エラー: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("環境変数エラー: {name} = {value}")]
    EnvVarError { name: String, value: String },

    #[error("設定値が無効です: {field} = {value}")]
    InvalidValue { field: String, value: String },
}

/// "human" / "computer" を操作主体に変換する
pub fn parse_control_type(value: &str) -> Option<ControlType> {
    match value.trim().to_lowercase().as_str() {
        "human" => Some(ControlType::Human),
        "computer" | "cpu" => Some(ControlType::Computer),
        _ => None,
    }
}

impl Config {
    /// 指定したファイルパスから設定を読み込む
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// 環境変数から設定を読み込む
    /// デフォルト値をベースに環境変数で上書きする
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Config::default();
        config.apply_env()?;
        Ok(config)
    }

    /// 設定済みの値に環境変数を上書き適用する
    fn apply_env(&mut self) -> Result<(), ConfigError> {
        if let Ok(depth) = env::var("REVERSI_SEARCH_DEPTH") {
            self.engine.search_depth = depth.parse().map_err(|_| ConfigError::EnvVarError {
                name: "REVERSI_SEARCH_DEPTH".to_string(),
                value: depth,
            })?;
        }

        for (name, slot) in [
            ("REVERSI_BLACK", &mut self.engine.black),
            ("REVERSI_WHITE", &mut self.engine.white),
        ] {
            if let Ok(value) = env::var(name) {
                *slot = parse_control_type(&value).ok_or_else(|| ConfigError::EnvVarError {
                    name: name.to_string(),
                    value,
                })?;
            }
        }

        if let Ok(level) = env::var("REVERSI_LOG_LEVEL") {
            self.logging.level = level;
        }

        Ok(())
    }

    /// 設定ファイルと環境変数を結合して設定を読み込む
    /// 設定ファイルがなくてもデフォルト値で動作する
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Config::default();

        for candidate in ["reversi.json", "config/reversi.json"] {
            if Path::new(candidate).exists() {
                config = Self::from_file(candidate)?;
                break;
            }
        }

        // 環境変数で設定を上書き
        config.apply_env()?;
        Ok(config)
    }

    /// 現在の設定を指定したファイルに保存する
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// 設定値の妥当性をチェックする
    /// 不正な値がある場合はConfigErrorを返す
    pub fn validate(&self) -> Result<(), ConfigError> {
        let limits = &self.system_limits;

        if limits.min_search_depth == 0 || limits.min_search_depth > limits.max_search_depth {
            return Err(ConfigError::InvalidValue {
                field: "system_limits.min_search_depth".to_string(),
                value: limits.min_search_depth.to_string(),
            });
        }

        if !(limits.min_search_depth..=limits.max_search_depth).contains(&self.engine.search_depth) {
            return Err(ConfigError::InvalidValue {
                field: "engine.search_depth".to_string(),
                value: self.engine.search_depth.to_string(),
            });
        }

        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "logging.level".to_string(),
                value: self.logging.level.clone(),
            });
        }

        Ok(())
    }
}
