//! Generated PDFs for decoder tests.

use lopdf::{dictionary, Document, Object, Stream};

/// Three clean rows: company, emission code, total shares, free float, shareholders.
pub(crate) const SAMPLE_ROWS: [[&str; 5]; 3] = [
    ["Sopharma AD", "BG11SOSOBT18", "134797899", "45000000", "5612"],
    ["Chimimport AD", "BG1100046066", "239256976", "43128754", "2731"],
    ["Shelly Group AD", "BG1100019176", "30000000", "7800000", "950"],
];

const COLUMN_X: [u32; 5] = [40, 200, 300, 380, 460];

/// A one-page report with a title line and each cell in its own text object.
pub(crate) fn report_pdf(rows: &[[&str; 5]]) -> Vec<u8> {
    let mut content = String::from("BT /F1 9 Tf 40 760 Td (Issuer Emission Shares Free float Holders) Tj ET\n");
    for (i, row) in rows.iter().enumerate() {
        let y = 720 - 20 * i as u32;
        for (x, cell) in COLUMN_X.iter().zip(row) {
            content.push_str(&format!("BT /F1 9 Tf {} {} Td ({}) Tj ET\n", x, y, cell));
        }
    }

    let mut doc = Document::with_version("1.4");
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        "Contents" => content_id,
        "Resources" => dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        },
    });
    let pages_id = doc.add_object(dictionary! {
        "Type" => "Pages",
        "Kids" => vec![page_id.into()],
        "Count" => 1,
    });
    if let Ok(Object::Dictionary(page)) = doc.get_object_mut(page_id) {
        page.set("Parent", pages_id);
    }
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}
