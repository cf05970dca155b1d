// build.rs
// 1. 读取JSON格式构建配置
// 2. 遍历内置汉化规则目录（分类目录/规则文件 两级结构）
// 3. 序列化为JSON包，可选LZ4压缩
// 4. 产物供主程序通过include_bytes!固化进最终二进制
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::{fs, path::Path};
use walkdir::WalkDir;

/// 构建期配置结构体
#[derive(Debug, Deserialize)]
struct BuildConfig {
    /// 内置规则根目录
    rules_dir: String,
    /// 打包产物文件名
    bundle_output_name: String,
    /// 是否启用LZ4压缩
    enable_compress: bool,
}

/// 打包条目，字段须与 src/rule/source/embedded.rs 中的 BundledDocument 保持一致
#[derive(Debug, Serialize)]
struct BundledDocument {
    category: String,
    name: String,
    content: String,
}

fn main() -> Result<(), Box<dyn Error>> {
    // 未开启嵌入式规则feature时不执行构建逻辑
    if std::env::var("CARGO_FEATURE_EMBEDDED_RULES").is_err() {
        return Ok(());
    }

    println!("cargo:rerun-if-changed=build_config.json");
    println!("cargo:rerun-if-changed=build.rs");

    let config_path = Path::new("build_config.json");
    let config_content = fs::read_to_string(config_path)
        .map_err(|e| format!("读取构建配置文件失败: {} - {}", config_path.display(), e))?;

    let cfg = serde_json::from_str::<BuildConfig>(&config_content)
        .map_err(|e| format!("解析build_config.json失败: {}", e))?;

    println!("cargo:rerun-if-changed={}", cfg.rules_dir);

    let rules_root = Path::new(&cfg.rules_dir);
    let mut documents = Vec::new();

    if rules_root.is_dir() {
        // 只收集 分类目录/文件 两级，其余层级忽略
        for entry in WalkDir::new(rules_root)
            .min_depth(2)
            .max_depth(2)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| format!("遍历规则目录失败: {}", e))?;
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            println!("cargo:rerun-if-changed={}", path.display());

            let category = path
                .parent()
                .and_then(|p| p.file_name())
                .map(|n| n.to_string_lossy().into_owned())
                .ok_or_else(|| format!("无法解析分类目录: {}", path.display()))?;
            let name = entry.file_name().to_string_lossy().into_owned();
            let content = fs::read_to_string(path)
                .map_err(|e| format!("读取规则文件失败: {} - {}", path.display(), e))?;

            documents.push(BundledDocument { category, name, content });
        }
    } else {
        println!(
            "cargo:warning=内置规则目录不存在: {}，将生成空规则包",
            rules_root.display()
        );
    }

    let bundle_bin = serde_json::to_vec(&documents)
        .map_err(|e| format!("JSON序列化规则包失败: {}", e))?;

    let bundle = if cfg.enable_compress {
        use lz4_flex::compress_prepend_size;
        compress_prepend_size(&bundle_bin)
    } else {
        bundle_bin
    };

    let out_dir = std::env::var("OUT_DIR")?;
    let out_path = Path::new(&out_dir).join(&cfg.bundle_output_name);
    fs::write(&out_path, &bundle)
        .map_err(|e| format!("写入规则包失败: {} - {}", out_path.display(), e))?;

    // 向编译环境注入构建配置常量，供 embedded.rs 读取
    println!(
        "cargo:rustc-env=RULE_BUNDLE_FILENAME={}",
        cfg.bundle_output_name
    );
    println!(
        "cargo:rustc-env=RULE_BUNDLE_COMPRESSED={}",
        if cfg.enable_compress { "1" } else { "0" }
    );

    Ok(())
}
