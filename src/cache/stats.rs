/// 價格序列快取統計信息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheStats {
    /// 是否已載入價格序列
    pub series_loaded: bool,
    /// 當前快取的聚合結果數
    pub size: usize,
    /// 快取容量
    pub capacity: usize,
}
