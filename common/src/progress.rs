//! 进度计算

/// 已处理行数 / 有效行数
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Progress {
    processed: usize,
    total: usize,
}

impl Progress {
    pub fn new(total: usize) -> Self {
        Self { processed: 0, total }
    }

    /// 一行出图完成后调用
    pub fn advance(&mut self) {
        if self.processed < self.total {
            self.processed += 1;
        }
    }

    pub fn processed(&self) -> usize {
        self.processed
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// 百分比（向下取整，0〜100）。有效行数为0时返回0
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        (self.processed * 100 / self.total).min(100) as u8
    }

    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.processed == self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_floors() {
        let mut progress = Progress::new(3);
        assert_eq!(progress.percent(), 0);
        progress.advance();
        assert_eq!(progress.percent(), 33);
        progress.advance();
        assert_eq!(progress.percent(), 66);
        progress.advance();
        assert_eq!(progress.percent(), 100);
        assert!(progress.is_complete());
    }

    #[test]
    fn test_zero_total_is_zero_percent() {
        let mut progress = Progress::new(0);
        assert_eq!(progress.percent(), 0);
        progress.advance();
        assert_eq!(progress.percent(), 0);
        assert!(!progress.is_complete());
    }

    #[test]
    fn test_never_exceeds_total() {
        let mut progress = Progress::new(2);
        for _ in 0..5 {
            progress.advance();
        }
        assert_eq!(progress.processed(), 2);
        assert_eq!(progress.percent(), 100);
    }
}
