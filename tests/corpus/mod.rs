use std::fs;
use std::path::Path;

use anyhow::Context as _;
use serde_json::{Value, json};

/// Chapters 1..3 with global ids 1-2, 3 and 4-5, written the way the corpus
/// lays them out on disk.
pub fn write_three_chapters(root: &Path) -> anyhow::Result<()> {
    let chapters = [
        (1, "01-birinci-soz.json", "Birinci Söz", 1, 2),
        (2, "02-ikinci-soz.json", "İkinci Söz", 3, 1),
        (3, "03-ucuncu-soz.json", "Üçüncü Söz", 4, 2),
    ];

    let mut toc = Vec::new();
    let mut page_map = serde_json::Map::new();
    for (soz_no, file, title, start, count) in chapters {
        let slug = file.trim_end_matches(".json").to_owned();
        let range = json!({"startId": start, "endId": start + count - 1, "count": count});
        toc.push(json!({
            "sozNo": soz_no,
            "title": format!("{soz_no}. {title}"),
            "slug": slug,
            "range": range
        }));

        let mut pages = Vec::new();
        for page_index in 1..=count {
            let global_id = start + page_index - 1;
            let url = format!("https://risale.example/{slug}/{page_index}");
            page_map.insert(
                global_id.to_string(),
                json!({"sozNo": soz_no, "slug": slug, "pageIndex": page_index, "url": url}),
            );
            pages.push(json!({
                "globalId": global_id,
                "pageIndex": page_index,
                "sozNo": soz_no,
                "url": url,
                "text_open": format!("{title} {page_index}. sayfa, kelâm (söz)"),
                "text_closed": format!("{title} {page_index}. sayfa, kelâm"),
                "footnotes": [],
                "dictionary": [{"word": "kelâm", "meaning": "söz"}]
            }));
        }
        write_json(
            &root.join("sozler").join(file),
            &json!({"sozNo": soz_no, "title": title, "slug": slug, "range": range, "pages": pages}),
        )?;
    }

    write_json(&root.join("index/toc.json"), &json!({"items": toc}))?;
    write_json(&root.join("index/page-map.json"), &Value::Object(page_map))?;
    write_json(
        &root.join("index/dictionary.json"),
        &json!({"kelâm": "söz", "nur": "ışık"}),
    )?;
    Ok(())
}

fn write_json(path: &Path, value: &Value) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create dir: {}", parent.display()))?;
    }
    fs::write(path, serde_json::to_vec_pretty(value)?)
        .with_context(|| format!("write fixture: {}", path.display()))
}
