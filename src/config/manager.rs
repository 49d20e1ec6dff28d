//! 設定管理を行うモジュール

use std::path::PathBuf;

use super::{
    ConfigError,
    HelperSettings,
    loader,
};

/// 設定管理を行う
#[derive(Default, Debug, Clone)]
pub struct ConfigManager {
    /// 現在の設定
    current_settings: HelperSettings,

    /// ワークスペースのルートパス
    workspace_root: Option<PathBuf>,
}

impl ConfigManager {
    /// 新しい設定マネージャーを作成
    #[must_use]
    pub fn new() -> Self {
        Self { current_settings: HelperSettings::default(), workspace_root: None }
    }

    /// 設定を読み込む
    ///
    /// クライアントの `initializationOptions` が優先され、無ければ
    /// ワークスペースの `.i18n-helper.json` を読む。
    ///
    /// # Errors
    /// - ファイル読み込みエラー
    /// - JSON パースエラー
    /// - バリデーションエラー
    pub fn load_settings(
        &mut self,
        workspace_root: Option<PathBuf>,
        client_settings: Option<HelperSettings>,
    ) -> Result<(), ConfigError> {
        tracing::debug!("Loading settings for workspace: {:?}", workspace_root);

        // 設定が不正でもルートは記録し、後続のエラー通知をユーザーに届ける
        self.workspace_root = workspace_root;

        let settings = if let Some(settings) = client_settings {
            settings
        } else if let Some(root) = self.workspace_root.as_deref() {
            loader::load_from_workspace(root)?.map_or_else(HelperSettings::default, |ws| {
                tracing::debug!("Loaded workspace settings: {:?}", ws);
                ws
            })
        } else {
            HelperSettings::default()
        };

        settings.validate().map_err(ConfigError::ValidationErrors)?;

        self.current_settings = settings;
        tracing::debug!("Settings loaded successfully: {:?}", self.current_settings);

        Ok(())
    }

    /// 設定を更新する（`didChangeConfiguration` 用）
    pub fn update_settings(&mut self, new_settings: HelperSettings) -> Result<(), ConfigError> {
        tracing::debug!("Updating settings...");

        new_settings.validate().map_err(ConfigError::ValidationErrors)?;

        self.current_settings = new_settings;
        tracing::debug!("Settings updated successfully");

        Ok(())
    }

    /// クライアントからの設定変更（`didChangeConfiguration`）を反映する
    ///
    /// 自分宛てでない値は無視する。`projects` が省略されていれば現在の
    /// プロジェクトを引き継ぐ。
    ///
    /// # Returns
    /// 設定が変わったかどうか
    ///
    /// # Errors
    /// - JSON パースエラー
    /// - バリデーションエラー（現在の設定は保持される）
    pub fn apply_client_change(&mut self, value: serde_json::Value) -> Result<bool, ConfigError> {
        let Some(mut settings) = loader::parse_settings_change(value)? else {
            tracing::debug!("Configuration change does not concern i18n helper");
            return Ok(false);
        };
        if settings.projects.is_none() {
            settings.projects.clone_from(&self.current_settings.projects);
        }

        self.update_settings(settings)?;
        Ok(true)
    }

    /// ワークスペースを切り替える（ワークスペースフォルダ変更時）
    ///
    /// 新しいワークスペースに `.i18n-helper.json` があればその設定を採用し、
    /// 無ければ現在の設定を引き継ぐ。
    ///
    /// # Errors
    /// 設定ファイルの読み込み・バリデーションに失敗した場合（ルートは切り替わる）
    pub fn switch_workspace(&mut self, workspace_root: Option<PathBuf>) -> Result<(), ConfigError> {
        let loaded = match &workspace_root {
            Some(root) => loader::load_from_workspace(root),
            None => Ok(None),
        };
        self.workspace_root = workspace_root;

        match loaded? {
            Some(settings) => self.update_settings(settings),
            None => Ok(()),
        }
    }

    /// 現在の設定を取得
    #[must_use]
    pub const fn get_settings(&self) -> &HelperSettings {
        &self.current_settings
    }

    /// ワークスペースルートを取得
    #[must_use]
    pub const fn workspace_root(&self) -> Option<&PathBuf> {
        self.workspace_root.as_ref()
    }
}
