//! 設定ファイルの読み込み関数

use std::path::Path;

use super::{
    ConfigError,
    HelperSettings,
    ServerSettings,
};

/// 自分宛ての設定であることを示すキー
const SETTINGS_KEYS: [&str; 3] = ["i18nHelper", "projects", "flatten"];

/// ワークスペース直下の設定ファイル名
pub(super) const CONFIG_FILE_NAME: &str = ".i18n-helper.json";

/// ワークスペースから設定を読み込む
///
/// `.i18n-helper.json` ファイルを探して読み込む
///
/// # Returns
/// - `Ok(Some(settings))`: 設定ファイルが見つかり、読み込みに成功
/// - `Ok(None)`: 設定ファイルが見つからない
/// - `Err(ConfigError)`: ファイル読み込みまたはパースエラー
pub(super) fn load_from_workspace(
    workspace_root: &Path,
) -> Result<Option<HelperSettings>, ConfigError> {
    let config_path = workspace_root.join(CONFIG_FILE_NAME);

    if !config_path.exists() {
        tracing::debug!("Configuration file not found: {:?}", config_path);
        return Ok(None);
    }

    tracing::debug!("Loading configuration from: {:?}", config_path);

    let content = std::fs::read_to_string(&config_path)?;
    Ok(Some(parse_settings(serde_json::from_str(&content)?)?))
}

/// クライアントから渡された JSON 値を設定として解釈する
///
/// `{"projects": [...]}` と `{"i18nHelper": {"projects": [...]}}` の両方を受け付ける
pub fn parse_settings(value: serde_json::Value) -> Result<HelperSettings, ConfigError> {
    if let Ok(wrapped) = serde_json::from_value::<ServerSettings>(value.clone()) {
        return Ok(wrapped.i18n_helper);
    }
    Ok(serde_json::from_value(value)?)
}

/// `didChangeConfiguration` の値を解釈する
///
/// `i18nHelper` セクションも `projects` / `flatten` キーも無い値は他の拡張向けの
/// 設定なので `None` を返す。
pub(super) fn parse_settings_change(
    value: serde_json::Value,
) -> Result<Option<HelperSettings>, ConfigError> {
    let ours = value
        .as_object()
        .is_some_and(|object| SETTINGS_KEYS.iter().any(|key| object.contains_key(*key)));
    if !ours {
        return Ok(None);
    }
    parse_settings(value).map(Some)
}
