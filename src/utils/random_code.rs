use rand::Rng;

// 加入码字符集：大写字母与数字，排除易混淆的 0/O/1/I
const CODE_CHARSET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// 生成班级加入码
///
/// 码在班级表上有唯一约束，冲突时由存储层重试。
pub fn generate_join_code(length: usize) -> String {
    let mut rng = rand::rng();
    (0..length)
        .map(|_| {
            let idx = rng.random_range(0..CODE_CHARSET.len());
            CODE_CHARSET[idx] as char
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_length() {
        assert_eq!(generate_join_code(6).len(), 6);
        assert_eq!(generate_join_code(8).len(), 8);
    }

    #[test]
    fn test_code_charset() {
        let code = generate_join_code(64);
        assert!(
            code.bytes()
                .all(|b| CODE_CHARSET.contains(&b))
        );
        // 排除的易混淆字符不应出现
        assert!(!code.contains('0') && !code.contains('O'));
        assert!(!code.contains('1') && !code.contains('I'));
    }
}
