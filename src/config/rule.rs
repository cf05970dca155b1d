//! 全局规则配置管理

use std::env;
use std::path::PathBuf;

/// 外部汉化规则目录环境变量
pub const RULES_DIR_ENV: &str = "OPENCODE_I18N_DIR";
/// 应用源码根目录环境变量
pub const SOURCE_DIR_ENV: &str = "OPENCODE_SOURCE_DIR";

/// 规则来源
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleOrigin {
    Auto,               // 外部目录存在且非空则优先，否则回退内置规则
    Embedded,           // 内置规则（编译期 embed）
    LocalDir(PathBuf),  // 本地规则目录（运行时）
}

/// 核心选项
#[derive(Debug, Clone)]
pub struct PatchOptions {
    /// 规则文档扩展名（不含点）
    pub document_extension: String,
    /// 未以 rooted_prefix 开头的目标路径自动补全的前缀
    pub app_prefix: PathBuf,
    /// 视为已定位到仓库根的目标路径前缀
    pub rooted_prefix: String,
    /// 覆盖率扫描目录（相对源码根目录）
    pub coverage_dir: PathBuf,
    /// 覆盖率候选文件扩展名
    pub candidate_extensions: Vec<String>,
    /// 诊断输出截断宽度（字符数）
    pub truncate_width: usize,
}

impl Default for PatchOptions {
    fn default() -> Self {
        Self {
            document_extension: "json".to_string(),
            app_prefix: PathBuf::from("packages").join("opencode"),
            rooted_prefix: "packages/".to_string(),
            coverage_dir: PathBuf::from("packages").join("opencode").join("src"),
            candidate_extensions: vec!["tsx".to_string(), "jsx".to_string()],
            truncate_width: 50,
        }
    }
}

/// 完整配置
#[derive(Debug, Clone)]
pub struct PatchConfig {
    pub origin: RuleOrigin,
    /// 应用源码根目录
    pub source_root: PathBuf,
    pub options: PatchOptions,
}

impl Default for PatchConfig {
    fn default() -> Self {
        Self {
            origin: RuleOrigin::Auto,
            source_root: PathBuf::from("."),
            options: PatchOptions::default(),
        }
    }
}

impl PatchConfig {
    /// 内置规则
    pub fn embedded(source_root: impl Into<PathBuf>) -> Self {
        Self {
            origin: RuleOrigin::Embedded,
            source_root: source_root.into(),
            options: PatchOptions::default(),
        }
    }

    /// 本地规则目录
    pub fn local_dir(rules_dir: impl Into<PathBuf>, source_root: impl Into<PathBuf>) -> Self {
        Self {
            origin: RuleOrigin::LocalDir(rules_dir.into()),
            source_root: source_root.into(),
            options: PatchOptions::default(),
        }
    }

    /// 从环境变量读取规则目录与源码目录
    /// 规则目录变量缺失时使用 Auto（等价于直接回退内置规则）
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(dir) = env::var_os(RULES_DIR_ENV).filter(|v| !v.is_empty()) {
            config.origin = RuleOrigin::LocalDir(PathBuf::from(dir));
        }
        if let Some(dir) = env::var_os(SOURCE_DIR_ENV).filter(|v| !v.is_empty()) {
            config.source_root = PathBuf::from(dir);
        }
        config
    }

    /// 外部规则目录（仅 LocalDir 来源）
    pub fn origin_dir(&self) -> Option<PathBuf> {
        match &self.origin {
            RuleOrigin::LocalDir(dir) => Some(dir.clone()),
            _ => None,
        }
    }

    /// 覆盖率扫描的绝对目录
    pub fn coverage_root(&self) -> PathBuf {
        self.source_root.join(&self.options.coverage_dir)
    }
}

/// 自定义构建器（链式 API）
#[derive(Debug, Clone, Default)]
pub struct CustomConfigBuilder {
    config: PatchConfig,
}

impl CustomConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// 以环境变量配置为起点
    pub fn from_env() -> Self {
        Self {
            config: PatchConfig::from_env(),
        }
    }

    pub fn origin(mut self, origin: RuleOrigin) -> Self {
        self.config.origin = origin;
        self
    }

    /// 显式指定外部规则目录；传入 None 时保留当前来源
    pub fn rules_dir(mut self, dir: Option<PathBuf>) -> Self {
        if let Some(dir) = dir {
            self.config.origin = RuleOrigin::LocalDir(dir);
        }
        self
    }

    pub fn source_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.config.source_root = root.into();
        self
    }

    pub fn coverage_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.options.coverage_dir = dir.into();
        self
    }

    pub fn candidate_extensions<I, S>(mut self, exts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.options.candidate_extensions = exts.into_iter().map(Into::into).collect();
        self
    }

    pub fn truncate_width(mut self, width: usize) -> Self {
        self.config.options.truncate_width = width;
        self
    }

    pub fn build(self) -> PatchConfig {
        self.config
    }
}
