#![no_main]

use std::rc::Rc;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use tint_engine::memory::{MemoryDocument, MemoryRule, MemoryStyle, MemoryStyleSheet};
use tint_engine::{CssAttribute, Tinter};

#[derive(Debug, Arbitrary)]
struct Sheet {
    href: Option<String>,
    disabled: bool,
    inaccessible: bool,
    rules: Vec<(String, u8, String)>,
}

#[derive(Debug, Arbitrary)]
struct Input {
    theme: Option<String>,
    sheets: Vec<Option<Sheet>>,
    tints: Vec<(Option<String>, Option<String>, Option<String>)>,
}

fuzz_target!(|input: Input| {
    let doc = Rc::new(MemoryDocument::new());
    let mut declarations = 0usize;
    for sheet in input.sheets {
        let Some(sheet) = sheet else {
            doc.push_unavailable_sheet();
            continue;
        };
        let memory = match &sheet.href {
            Some(href) => MemoryStyleSheet::external(href),
            None => MemoryStyleSheet::inline(),
        };
        memory.set_disabled(sheet.disabled);
        memory.set_inaccessible(sheet.inaccessible);
        for (selector, attr, value) in &sheet.rules {
            let attr = CssAttribute::ALL[usize::from(*attr) % CssAttribute::ALL.len()];
            memory.push_rule(MemoryRule::new(selector, MemoryStyle::new().with(attr, value)));
            declarations += 1;
        }
        doc.push_sheet(memory);
    }

    let tinter = Tinter::new(doc);
    if let Some(theme) = input.theme {
        tinter.set_theme(theme);
    }
    let fixups = tinter.compute_css_fixups();
    assert!(fixups <= declarations, "more fixups than declarations");

    for (primary, secondary, tertiary) in &input.tints {
        let _ = tinter.tint(primary.as_deref(), secondary.as_deref(), tertiary.as_deref());
    }
    assert_eq!(tinter.css_scan_count(), 1, "active theme was rescanned");
});
