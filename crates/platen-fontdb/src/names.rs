// this_file: crates/platen-fontdb/src/names.rs

//! Family names as they appear in design files, mapped to font files.

/// Display name (or alias) and the file that usually carries it.
const FONT_FILES: &[(&str, &str)] = &[
    ("黑体", "simhei.ttf"),
    ("SimHei", "simhei.ttf"),
    ("宋体", "simsun.ttc"),
    ("SimSun", "simsun.ttc"),
    ("微软雅黑", "msyh.ttc"),
    ("Microsoft YaHei", "msyh.ttc"),
    ("楷体", "simkai.ttf"),
    ("KaiTi", "simkai.ttf"),
    ("仿宋", "simfang.ttf"),
    ("FangSong", "simfang.ttf"),
    ("等线", "Deng.ttf"),
    ("DengXian", "Deng.ttf"),
    ("隶书", "SIMLI.TTF"),
    ("LiSu", "SIMLI.TTF"),
    ("幼圆", "SIMYOU.TTF"),
    ("YouYuan", "SIMYOU.TTF"),
    ("Arial", "arial.ttf"),
    ("Times New Roman", "times.ttf"),
    ("Courier New", "cour.ttf"),
];

/// Lower-cases and drops spaces so "Microsoft YaHei" matches "microsoftyahei".
pub fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// File name for a family, matched as a substring in either direction.
///
/// "ArialMT" finds `arial.ttf`; "黑" alone finds `simhei.ttf`. The first
/// table entry that matches wins.
pub fn file_for_name(name: &str) -> Option<&'static str> {
    let wanted = normalize(name);
    if wanted.is_empty() {
        return None;
    }

    FONT_FILES.iter().find_map(|(display, file)| {
        let key = normalize(display);
        (wanted.contains(&key) || key.contains(&wanted)).then_some(*file)
    })
}
