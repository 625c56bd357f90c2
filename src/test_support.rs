//! Small corpus shared by the unit tests.
//!
//! Chapters 1..3 hold global ids 1-2, 3 and 4-5. Two interludes follow the
//! last chapter: `lemeat` (ids 7-8) and `ek-konferans` (id 9). Id 6 is a gap.

use serde_json::{Value, json};

use crate::config::{DICTIONARY_PATH, PAGE_MAP_PATH, TOC_PATH};
use crate::store::MemoryStore;

pub(crate) fn page(global_id: u32, page_index: u32, soz_no: u32) -> Value {
    json!({
        "globalId": global_id,
        "pageIndex": page_index,
        "sozNo": soz_no,
        "url": format!("https://example.com/{global_id}"),
        "text_open": format!("Sayfa {global_id} metni (manası)"),
        "text_closed": format!("Sayfa {global_id} metni"),
        "footnotes": [{"n": "1", "text": format!("Dipnot {global_id}")}],
        "dictionary": [{"word": "mana", "meaning": "anlam"}]
    })
}

fn chapter_entry(soz_no: u32, start: u32, count: u32) -> Value {
    json!({
        "sozNo": soz_no,
        "title": format!("{soz_no}. Söz"),
        "slug": format!("soz-{soz_no}"),
        "range": {"startId": start, "endId": start + count - 1, "count": count}
    })
}

fn chapter_file(soz_no: u32, start: u32, count: u32) -> Value {
    let pages = (0..count)
        .map(|i| page(start + i, i + 1, soz_no))
        .collect::<Vec<_>>();
    json!({
        "sozNo": soz_no,
        "title": format!("{soz_no}. Söz"),
        "slug": format!("soz-{soz_no}"),
        "range": {"startId": start, "endId": start + count - 1, "count": count},
        "pages": pages
    })
}

pub(crate) fn fixture_store() -> MemoryStore {
    let toc = json!({"items": [
        chapter_entry(1, 1, 2),
        chapter_entry(2, 3, 1),
        chapter_entry(3, 4, 2),
        {
            "type": "interlude", "title": "Lemeât", "slug": "lemeat",
            "range": {"startId": 7, "endId": 8, "count": 2},
            "afterSoz": 3, "beforeSoz": null,
            "subheadings": [{"title": "Başlangıç", "pageIndex": 2}]
        },
        {
            "type": "interlude", "title": "Konferans", "slug": "ek-konferans",
            "range": {"startId": 9, "endId": 9, "count": 1},
            "afterSoz": null, "beforeSoz": null
        }
    ]});

    let mut page_map = serde_json::Map::new();
    for (id, soz_no, page_index) in [(1, 1, 1), (2, 1, 2), (3, 2, 1), (4, 3, 1), (5, 3, 2)] {
        page_map.insert(
            id.to_string(),
            json!({"sozNo": soz_no, "slug": format!("soz-{soz_no}"), "pageIndex": page_index, "url": ""}),
        );
    }
    for (id, slug, title, page_index, after) in [
        (7, "lemeat", "Lemeât", 1, Some(3)),
        (8, "lemeat", "Lemeât", 2, Some(3)),
        (9, "ek-konferans", "Konferans", 1, None),
    ] {
        page_map.insert(
            id.to_string(),
            json!({
                "type": "interlude", "slug": slug, "pageIndex": page_index, "url": "",
                "title": title, "afterSoz": after, "beforeSoz": null
            }),
        );
    }

    MemoryStore::new()
        .with_json(TOC_PATH, &toc)
        .with_json(PAGE_MAP_PATH, &Value::Object(page_map))
        .with_json(
            DICTIONARY_PATH,
            &json!({"mana": "anlam", "kelam": "söz", "nur": "ışık"}),
        )
        .with_json("sozler/01-birinci-soz.json", &chapter_file(1, 1, 2))
        .with_json("sozler/02-ikinci-soz.json", &chapter_file(2, 3, 1))
        .with_json("sozler/03-ucuncu-soz.json", &chapter_file(3, 4, 2))
        .with_json(
            "sozler/lemeat.json",
            &json!({"title": "Lemeât", "pages": [page(7, 1, 0), page(8, 2, 0)]}),
        )
        .with_json(
            "sozler/ek-konferans.json",
            &json!({"title": "Konferans", "pages": [page(9, 1, 0)]}),
        )
}
