//! # 样品目录定位器
//!
//! 在数据根目录下查找样品的数据目录并加载各次扫描。
//!
//! ## 目录约定
//! ```text
//! <root>/.../<sample path>/
//!   ├── <sample>_1/
//!   │     ├── <sample>_1__EDX_0.txt       (标记文件)
//!   │     ├── <sample>1_alldata_0.txt
//!   │     └── <sample>1_alldata_1.txt
//!   └── <sample>_2/ ...
//! ```
//! 样品路径是标记文件所在目录的上一级。
//!
//! ## 依赖关系
//! - 被 `commands/` 和 `models/session.rs` 调用
//! - 使用 `walkdir` 遍历目录, `regex` 匹配标记文件, `glob` 过滤样品名
//! - 使用 `parsers/alldata.rs` 读取扫描

use crate::error::{Result, XesError};
use crate::models::Spectrum;
use crate::parsers::alldata;

use regex::Regex;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 扫描选择
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RunSelection {
    /// 从 0 开始，直到第一个缺失的文件
    #[default]
    All,
    /// 从指定编号开始，直到第一个缺失的文件
    From(u32),
    /// 按列表加载，遇到缺失文件即停止
    List(Vec<u32>),
}

impl RunSelection {
    /// 解析扫描选择："3" 表示从 3 开始，"1,2,5" 列表，"2-5" 闭区间
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        let invalid = || XesError::InvalidRange(format!("{} (expected N, N-M or N,M,...)", input));

        if input.is_empty() || input.eq_ignore_ascii_case("all") {
            return Ok(RunSelection::All);
        }

        if input.contains(',') {
            let runs = input
                .split(',')
                .map(|s| s.trim().parse::<u32>().map_err(|_| invalid()))
                .collect::<Result<Vec<_>>>()?;
            return Ok(RunSelection::List(runs));
        }

        if let Some((start, end)) = input.split_once('-') {
            let start: u32 = start.trim().parse().map_err(|_| invalid())?;
            let end: u32 = end.trim().parse().map_err(|_| invalid())?;
            if end < start {
                return Err(invalid());
            }
            return Ok(RunSelection::List((start..=end).collect()));
        }

        input.parse().map(RunSelection::From).map_err(|_| invalid())
    }

    /// 候选扫描编号（无界选择按需截断）
    fn candidates(&self) -> Box<dyn Iterator<Item = u32> + '_> {
        match self {
            RunSelection::All => Box::new(0..),
            RunSelection::From(start) => Box::new(*start..),
            RunSelection::List(runs) => Box::new(runs.iter().copied()),
        }
    }
}

/// 样品目录定位器（带缓存）
pub struct SampleLocator {
    /// 数据根目录
    root: PathBuf,
    /// 样品名 -> 样品路径
    cache: HashMap<String, PathBuf>,
}

impl SampleLocator {
    /// 创建定位器，根目录必须存在
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(XesError::DirectoryNotFound {
                path: root.display().to_string(),
            });
        }
        Ok(Self {
            root,
            cache: HashMap::new(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// 是否已缓存
    pub fn is_cached(&self, sample: &str) -> bool {
        self.cache.contains_key(sample)
    }

    /// 查找样品路径，首次查找后缓存
    pub fn locate(&mut self, sample: &str) -> Result<PathBuf> {
        if let Some(path) = self.cache.get(sample) {
            return Ok(path.clone());
        }

        let path = self.search(sample)?;
        self.cache.insert(sample.to_string(), path.clone());
        Ok(path)
    }

    /// 遍历根目录查找标记文件
    fn search(&self, sample: &str) -> Result<PathBuf> {
        let marker = marker_regex(&regex::escape(sample))?;

        WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .find(|e| {
                e.file_name()
                    .to_str()
                    .map(|name| marker.is_match(name))
                    .unwrap_or(false)
            })
            .and_then(|e| e.path().parent().and_then(Path::parent).map(Path::to_path_buf))
            .ok_or_else(|| XesError::SampleNotFound {
                sample: sample.to_string(),
                root: self.root.display().to_string(),
            })
    }

    /// 列出根目录下所有样品（按名称过滤）
    pub fn discover(&mut self, pattern: &str) -> Result<Vec<(String, PathBuf)>> {
        let filter = glob::Pattern::new(pattern)
            .map_err(|e| XesError::InvalidArgument(format!("Invalid pattern '{}': {}", pattern, e)))?;
        let marker = marker_regex("(?P<sample>.+?)")?;

        let mut found: BTreeMap<String, PathBuf> = BTreeMap::new();
        for entry in WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
        {
            let name = match entry.file_name().to_str() {
                Some(name) => name,
                None => continue,
            };
            let sample = match marker.captures(name) {
                Some(caps) => caps["sample"].to_string(),
                None => continue,
            };
            if !filter.matches(&sample) || found.contains_key(&sample) {
                continue;
            }
            if let Some(path) = entry.path().parent().and_then(Path::parent) {
                found.insert(sample, path.to_path_buf());
            }
        }

        for (sample, path) in &found {
            self.cache.entry(sample.clone()).or_insert_with(|| path.clone());
        }

        Ok(found.into_iter().collect())
    }

    /// 单次扫描文件路径
    pub fn run_file(&mut self, sample: &str, batch: u32, run: u32) -> Result<PathBuf> {
        let sample_path = self.locate(sample)?;
        Ok(run_file_path(&sample_path, sample, batch, run))
    }

    /// 加载扫描，遇到第一个缺失文件停止
    pub fn load_runs(
        &mut self,
        sample: &str,
        selection: &RunSelection,
        batch: u32,
    ) -> Result<BTreeMap<u32, Spectrum>> {
        let sample_path = self.locate(sample)?;
        load_runs_from(&sample_path, sample, selection, batch)
    }
}

/// 标记文件正则：`<sample>_<n>__EDX_<m>.txt`
fn marker_regex(sample: &str) -> Result<Regex> {
    Regex::new(&format!(r"^{}_\d+__EDX_\d+\.txt$", sample))
        .map_err(|e| XesError::InvalidArgument(format!("Invalid sample pattern: {}", e)))
}

/// `<sample path>/<sample>_<batch>/<sample><batch>_alldata_<run>.txt`
pub fn run_file_path(sample_path: &Path, sample: &str, batch: u32, run: u32) -> PathBuf {
    sample_path
        .join(format!("{}_{}", sample, batch))
        .join(format!("{}{}_alldata_{}.txt", sample, batch, run))
}

/// 从已知样品路径加载扫描
pub fn load_runs_from(
    sample_path: &Path,
    sample: &str,
    selection: &RunSelection,
    batch: u32,
) -> Result<BTreeMap<u32, Spectrum>> {
    let mut runs = BTreeMap::new();
    let mut seen = BTreeSet::new();

    for run in selection.candidates() {
        let path = run_file_path(sample_path, sample, batch, run);
        if !path.is_file() {
            break;
        }
        if seen.insert(run) {
            runs.insert(run, alldata::parse_alldata_file(&path)?);
        }
    }

    Ok(runs)
}

/// 样品路径下的批次数（子目录数）
pub fn count_batches(path: &Path) -> Result<usize> {
    let entries = fs::read_dir(path).map_err(|e| XesError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    Ok(entries
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_dir())
        .count())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_run(dir: &Path, sample: &str, batch: u32, run: u32, scale: f64) {
        let content = format!(
            "scan\nheader\nEnergy_(eV)\tcnts_per_live\n8320\t{}\n8321\t{}\n",
            scale,
            2.0 * scale
        );
        fs::write(run_file_path(dir, sample, batch, run), content).unwrap();
    }

    /// root/2019/CuO/CuO_1/{CuO_1__EDX_0.txt, CuO1_alldata_*.txt}
    fn fixture() -> (tempfile::TempDir, PathBuf) {
        let root = tempfile::tempdir().unwrap();
        let sample_path = root.path().join("2019").join("CuO");
        let batch_dir = sample_path.join("CuO_1");
        fs::create_dir_all(&batch_dir).unwrap();
        fs::create_dir_all(sample_path.join("CuO_2")).unwrap();
        fs::write(batch_dir.join("CuO_1__EDX_0.txt"), "").unwrap();
        for run in 0..3 {
            write_run(&sample_path, "CuO", 1, run, run as f64 + 1.0);
        }

        let other = root.path().join("2020").join("NiO").join("NiO_1");
        fs::create_dir_all(&other).unwrap();
        fs::write(other.join("NiO_1__EDX_12.txt"), "").unwrap();

        (root, sample_path)
    }

    #[test]
    fn test_run_selection_parse() {
        assert_eq!(RunSelection::parse("").unwrap(), RunSelection::All);
        assert_eq!(RunSelection::parse("3").unwrap(), RunSelection::From(3));
        assert_eq!(
            RunSelection::parse("1, 2,5").unwrap(),
            RunSelection::List(vec![1, 2, 5])
        );
        assert_eq!(
            RunSelection::parse("2-4").unwrap(),
            RunSelection::List(vec![2, 3, 4])
        );
        assert!(RunSelection::parse("4-2").is_err());
        assert!(RunSelection::parse("x").is_err());
    }

    #[test]
    fn test_locate_and_cache() {
        let (root, sample_path) = fixture();
        let mut locator = SampleLocator::new(root.path()).unwrap();

        assert!(!locator.is_cached("CuO"));
        assert_eq!(locator.locate("CuO").unwrap(), sample_path);
        assert!(locator.is_cached("CuO"));
        assert_eq!(count_batches(&sample_path).unwrap(), 2);
    }

    #[test]
    fn test_locate_does_not_match_prefix() {
        let (root, _) = fixture();
        let mut locator = SampleLocator::new(root.path()).unwrap();
        assert!(matches!(
            locator.locate("Cu"),
            Err(XesError::SampleNotFound { .. })
        ));
    }

    #[test]
    fn test_missing_root() {
        assert!(matches!(
            SampleLocator::new("/definitely/not/here"),
            Err(XesError::DirectoryNotFound { .. })
        ));
    }

    #[test]
    fn test_load_runs_stops_at_first_missing() {
        let (root, _) = fixture();
        let mut locator = SampleLocator::new(root.path()).unwrap();

        let all = locator.load_runs("CuO", &RunSelection::All, 1).unwrap();
        assert_eq!(all.keys().copied().collect::<Vec<_>>(), vec![0, 1, 2]);
        assert_eq!(all[&2].intensity(), &[3.0, 6.0]);

        let from = locator.load_runs("CuO", &RunSelection::From(1), 1).unwrap();
        assert_eq!(from.keys().copied().collect::<Vec<_>>(), vec![1, 2]);

        let list = locator
            .load_runs("CuO", &RunSelection::List(vec![2, 0, 7, 1]), 1)
            .unwrap();
        assert_eq!(list.keys().copied().collect::<Vec<_>>(), vec![0, 2]);

        let none = locator.load_runs("CuO", &RunSelection::All, 2).unwrap();
        assert!(none.is_empty());
    }

    #[test]
    fn test_discover() {
        let (root, sample_path) = fixture();
        let mut locator = SampleLocator::new(root.path()).unwrap();

        let all = locator.discover("*").unwrap();
        let names: Vec<_> = all.iter().map(|(s, _)| s.as_str()).collect();
        assert_eq!(names, vec!["CuO", "NiO"]);
        assert_eq!(all[0].1, sample_path);
        assert!(locator.is_cached("NiO"));

        let filtered = locator.discover("Ni*").unwrap();
        assert_eq!(filtered.len(), 1);
        assert!(locator.discover("[").is_err());
    }
}
