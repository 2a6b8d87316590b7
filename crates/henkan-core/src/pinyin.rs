//! Pinyin syllable table and greedy syllable splitting.

use std::collections::HashSet;
use std::sync::OnceLock;

/// Toneless pinyin syllables (ü written as `v`).
static SYLLABLES: &[&str] = &[
    "a", "ai", "an", "ang", "ao",
    "ba", "bai", "ban", "bang", "bao", "bei", "ben", "beng", "bi", "bian", "biao", "bie", "bin",
    "bing", "bo", "bu",
    "ca", "cai", "can", "cang", "cao", "ce", "cen", "ceng", "cha", "chai", "chan", "chang", "chao",
    "che", "chen", "cheng", "chi", "chong", "chou", "chu", "chua", "chuai", "chuan", "chuang",
    "chui", "chun", "chuo", "ci", "cong", "cou", "cu", "cuan", "cui", "cun", "cuo",
    "da", "dai", "dan", "dang", "dao", "de", "dei", "den", "deng", "di", "dia", "dian", "diao",
    "die", "ding", "diu", "dong", "dou", "du", "duan", "dui", "dun", "duo",
    "e", "ei", "en", "eng", "er",
    "fa", "fan", "fang", "fei", "fen", "feng", "fo", "fou", "fu",
    "ga", "gai", "gan", "gang", "gao", "ge", "gei", "gen", "geng", "gong", "gou", "gu", "gua",
    "guai", "guan", "guang", "gui", "gun", "guo",
    "ha", "hai", "han", "hang", "hao", "he", "hei", "hen", "heng", "hong", "hou", "hu", "hua",
    "huai", "huan", "huang", "hui", "hun", "huo",
    "ji", "jia", "jian", "jiang", "jiao", "jie", "jin", "jing", "jiong", "jiu", "ju", "juan",
    "jue", "jun",
    "ka", "kai", "kan", "kang", "kao", "ke", "kei", "ken", "keng", "kong", "kou", "ku", "kua",
    "kuai", "kuan", "kuang", "kui", "kun", "kuo",
    "la", "lai", "lan", "lang", "lao", "le", "lei", "leng", "li", "lia", "lian", "liang", "liao",
    "lie", "lin", "ling", "liu", "lo", "long", "lou", "lu", "luan", "lun", "luo", "lv", "lve",
    "ma", "mai", "man", "mang", "mao", "me", "mei", "men", "meng", "mi", "mian", "miao", "mie",
    "min", "ming", "miu", "mo", "mou", "mu",
    "na", "nai", "nan", "nang", "nao", "ne", "nei", "nen", "neng", "ni", "nian", "niang", "niao",
    "nie", "nin", "ning", "niu", "nong", "nou", "nu", "nuan", "nuo", "nv", "nve",
    "o", "ou",
    "pa", "pai", "pan", "pang", "pao", "pei", "pen", "peng", "pi", "pian", "piao", "pie", "pin",
    "ping", "po", "pou", "pu",
    "qi", "qia", "qian", "qiang", "qiao", "qie", "qin", "qing", "qiong", "qiu", "qu", "quan",
    "que", "qun",
    "ran", "rang", "rao", "re", "ren", "reng", "ri", "rong", "rou", "ru", "rua", "ruan", "rui",
    "run", "ruo",
    "sa", "sai", "san", "sang", "sao", "se", "sen", "seng", "sha", "shai", "shan", "shang", "shao",
    "she", "shei", "shen", "sheng", "shi", "shou", "shu", "shua", "shuai", "shuan", "shuang",
    "shui", "shun", "shuo", "si", "song", "sou", "su", "suan", "sui", "sun", "suo",
    "ta", "tai", "tan", "tang", "tao", "te", "teng", "ti", "tian", "tiao", "tie", "ting", "tong",
    "tou", "tu", "tuan", "tui", "tun", "tuo",
    "wa", "wai", "wan", "wang", "wei", "wen", "weng", "wo", "wu",
    "xi", "xia", "xian", "xiang", "xiao", "xie", "xin", "xing", "xiong", "xiu", "xu", "xuan",
    "xue", "xun",
    "ya", "yan", "yang", "yao", "ye", "yi", "yin", "ying", "yo", "yong", "you", "yu", "yuan",
    "yue", "yun",
    "za", "zai", "zan", "zang", "zao", "ze", "zei", "zen", "zeng", "zha", "zhai", "zhan", "zhang",
    "zhao", "zhe", "zhei", "zhen", "zheng", "zhi", "zhong", "zhou", "zhu", "zhua", "zhuai",
    "zhuan", "zhuang", "zhui", "zhun", "zhuo", "zi", "zong", "zou", "zu", "zuan", "zui", "zun",
    "zuo",
];

/// Longest syllable in the table ("chuang", "shuang", "zhuang").
const MAX_SYLLABLE_LEN: usize = 6;

/// Explicit syllable separator typed by the user (e.g. `xi'an`).
pub const SEPARATOR: char = '\'';

fn syllable_set() -> &'static HashSet<&'static str> {
    static SET: OnceLock<HashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| SYLLABLES.iter().copied().collect())
}

pub fn is_syllable(s: &str) -> bool {
    syllable_set().contains(s)
}

/// Split a separator-free pinyin string into unit boundaries (byte offsets,
/// starting with 0 and ending with `text.len()`).
///
/// Greedy longest match against the syllable table. Anything that does not
/// start a syllable (an abbreviation initial, a digit, a non-ASCII char)
/// becomes a one-character unit.
pub fn split_bounds(text: &str) -> Vec<usize> {
    let mut bounds = vec![0];
    let mut pos = 0;
    while pos < text.len() {
        let rest = &text[pos..];
        let longest = (1..=MAX_SYLLABLE_LEN.min(rest.len()))
            .rev()
            .filter(|&n| rest.is_char_boundary(n))
            .find(|&n| is_syllable(&rest[..n]));
        let step = match longest {
            Some(n) => n,
            None => rest.chars().next().map_or(rest.len(), |c| c.len_utf8()),
        };
        pos += step;
        bounds.push(pos);
    }
    bounds
}

/// Split a pinyin string into syllables, honouring explicit separators.
pub fn split(text: &str) -> Vec<&str> {
    let mut out = Vec::new();
    for part in text.split(SEPARATOR) {
        let bounds = split_bounds(part);
        out.extend(bounds.windows(2).map(|w| &part[w[0]..w[1]]));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_whole_syllables() {
        assert_eq!(split("nihao"), vec!["ni", "hao"]);
        assert_eq!(split("zhongguo"), vec!["zhong", "guo"]);
        assert_eq!(split("shuang"), vec!["shuang"]);
    }

    #[test]
    fn test_split_separator() {
        assert_eq!(split("xian"), vec!["xian"]);
        assert_eq!(split("xi'an"), vec!["xi", "an"]);
    }

    #[test]
    fn test_split_abbreviation() {
        assert_eq!(split("nh"), vec!["n", "h"]);
        assert_eq!(split("nih"), vec!["ni", "h"]);
    }

    #[test]
    fn test_split_bounds_cover_input() {
        let bounds = split_bounds("women");
        assert_eq!(bounds.first(), Some(&0));
        assert_eq!(bounds.last(), Some(&5));
    }

    #[test]
    fn test_table_has_no_duplicates() {
        assert_eq!(syllable_set().len(), SYLLABLES.len());
    }
}
