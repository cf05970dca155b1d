//! 汉化引擎门面
//! 按配置选择规则源并组装加载、校验、应用、覆盖率四个组件。
//! 每次调用 load 都重新读取规则源，不跨调用缓存。

use crate::applier::RuleApplier;
use crate::config::PatchConfig;
use crate::coverage::{CoverageReporter, CoverageSnapshot};
use crate::error::I18nResult;
use crate::rule::core::{ApplyReport, RuleSet, RuleStats};
use crate::rule::loader::{LoadReport, RuleLoader};
use crate::verifier::{RuleVerifier, StructuralIssue, Violation};

#[derive(Debug)]
pub struct I18nPatcher {
    config: PatchConfig,
    loader: RuleLoader,
    verifier: RuleVerifier,
    applier: RuleApplier,
    coverage: CoverageReporter,
}

impl I18nPatcher {
    pub fn new(config: PatchConfig) -> I18nResult<Self> {
        let loader = RuleLoader::from_config(&config)?;
        Ok(Self::with_loader(config, loader))
    }

    /// 注入自定义规则源
    pub fn with_loader(config: PatchConfig, loader: RuleLoader) -> Self {
        let options = config.options.clone();
        Self {
            verifier: RuleVerifier::new(options.truncate_width),
            applier: RuleApplier::new(options.clone()),
            coverage: CoverageReporter::new(options),
            loader,
            config,
        }
    }

    pub fn config(&self) -> &PatchConfig {
        &self.config
    }

    pub fn loader(&self) -> &RuleLoader {
        &self.loader
    }

    pub fn load(&self) -> I18nResult<LoadReport> {
        self.loader.load()
    }

    pub fn stats(&self, rule_sets: &[RuleSet]) -> RuleStats {
        RuleStats::collect(rule_sets)
    }

    pub fn check_structure(&self, rule_sets: &[RuleSet]) -> Vec<StructuralIssue> {
        self.verifier.check_structure(rule_sets)
    }

    pub fn verify(&self, rule_sets: &[RuleSet]) -> Vec<Violation> {
        self.verifier.verify_all(rule_sets)
    }

    pub fn apply(&self, rule_sets: &[RuleSet], dry_run: bool) -> ApplyReport {
        self.applier.apply_all(rule_sets, &self.config.source_root, dry_run)
    }

    pub fn coverage(&self, rule_sets: &[RuleSet]) -> CoverageSnapshot {
        self.coverage.coverage_with_defaults(&self.config.source_root, rule_sets)
    }
}
