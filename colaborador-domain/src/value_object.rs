//! 值对象（Value Object）
//!
//! 无标识、以值相等为准的对象。
//!

use std::fmt;

use colaborador_macros::value_object;

/// 版本号（用于乐观锁和并发控制）
///
/// 存储约定：首次保存后的版本为 0，此后每次成功更新加 1。
///
/// # 示例
///
/// ```
/// use colaborador_domain::value_object::Version;
///
/// let v0 = Version::new();
/// assert_eq!(v0.value(), 0);
///
/// let v1 = v0.next().unwrap();
/// assert_eq!(v1.value(), 1);
/// assert!(v1 > v0);
/// ```
#[value_object(ordered = true)]
pub struct Version(usize);

impl Version {
    /// 创建初始版本（版本号为 0）
    pub const fn new() -> Self {
        Self(0)
    }

    /// 从值创建版本号
    ///
    /// # 示例
    ///
    /// ```
    /// use colaborador_domain::value_object::Version;
    ///
    /// let v = Version::from_value(5);
    /// assert_eq!(v.value(), 5);
    /// ```
    pub const fn from_value(value: usize) -> Self {
        Self(value)
    }

    /// 获取下一个版本号；超出存储列（`i64`）可表示的范围时返回 `None`
    pub fn next(&self) -> Option<Self> {
        self.0
            .checked_add(1)
            .filter(|n| i64::try_from(*n).is_ok())
            .map(Self)
    }

    /// 获取版本号的值
    pub const fn value(&self) -> usize {
        self.0
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

impl From<usize> for Version {
    fn from(value: usize) -> Self {
        Self::from_value(value)
    }
}

impl From<Version> for usize {
    fn from(version: Version) -> Self {
        version.value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_new_is_zero() {
        let v = Version::new();
        assert_eq!(v.value(), 0);
        assert_eq!(v, Version::default());
    }

    #[test]
    fn test_version_next_increments_by_one() {
        let v1 = Version::from_value(10);
        let v2 = v1.next().unwrap();

        assert_eq!(v1.value(), 10);
        assert_eq!(v2.value(), 11);
    }

    #[test]
    fn test_version_next_stops_at_storage_limit() {
        let last = Version::from_value(i64::MAX as usize);
        assert_eq!(last.next(), None);
        assert_eq!(Version::from_value(usize::MAX).next(), None);
        assert_eq!(
            Version::from_value(i64::MAX as usize - 1).next(),
            Some(last)
        );
    }

    #[test]
    fn test_version_ordering() {
        let v0 = Version::from_value(0);
        let v1 = Version::from_value(1);
        let v2 = Version::from_value(2);

        assert!(v1 > v0);
        assert!(v2 >= v1);
        assert!(v0 < v2);
        assert_ne!(v1, v2);
    }

    #[test]
    fn test_version_display() {
        assert_eq!(format!("{}", Version::new()), "v0");
        assert_eq!(format!("{}", Version::from_value(5)), "v5");
    }

    #[test]
    fn test_version_usize_conversions() {
        let v: Version = 42.into();
        assert_eq!(v.value(), 42);
        let num: usize = v.into();
        assert_eq!(num, 42);
    }

    // 版本号以裸数字序列化，与存储列保持一致
    #[test]
    fn test_version_serde() {
        let v = Version::from_value(42);

        let json = serde_json::to_string(&v).unwrap();
        assert_eq!(json, "42");

        let deserialized: Version = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, v);
    }
}
