use printpdf::{BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, Point, Rgb};
use thiserror::Error;

use crate::core::time::format_long_date;

const A4_WIDTH_PT: f64 = 595.28;
const A4_HEIGHT_PT: f64 = 841.89;
const PT_TO_MM: f64 = 0.352_778;

const NAVY: (f64, f64, f64) = (0.118, 0.227, 0.541);
const LIGHT_BLUE: (f64, f64, f64) = (0.231, 0.510, 0.965);
const BLACK: (f64, f64, f64) = (0.0, 0.0, 0.0);

#[derive(Debug, Error)]
pub(crate) enum PdfError {
    #[error("pdf rendering failed: {0}")]
    Render(String),
}

/// Everything the fixed certificate layout needs. One renderer serves both
/// the student download endpoint and the administrative regenerate action.
#[derive(Debug, Clone)]
pub(crate) struct CertificateDocument<'a> {
    pub(crate) student_name: &'a str,
    pub(crate) student_number: &'a str,
    pub(crate) course_title: &'a str,
    pub(crate) certificate_number: &'a str,
    pub(crate) issue_date: time::Date,
    pub(crate) institution_name: &'a str,
    pub(crate) signatory_title: &'a str,
}

pub(crate) fn render_certificate(document: &CertificateDocument<'_>) -> Result<Vec<u8>, PdfError> {
    let (doc, page, layer) =
        PdfDocument::new("Certificate of Completion", Mm(210.0), Mm(297.0), "Layer 1");
    let canvas = doc.get_page(page).get_layer(layer);

    let helvetica = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|err| PdfError::Render(err.to_string()))?;
    let helvetica_bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|err| PdfError::Render(err.to_string()))?;

    // Double border, navy outside, lighter blue inside.
    canvas.set_outline_color(rgb(NAVY));
    canvas.set_outline_thickness(3.0);
    canvas.add_line(stroke_rect(30.0, 30.0, A4_WIDTH_PT - 60.0, A4_HEIGHT_PT - 60.0));

    canvas.set_outline_color(rgb(LIGHT_BLUE));
    canvas.set_outline_thickness(1.0);
    canvas.add_line(stroke_rect(40.0, 40.0, A4_WIDTH_PT - 80.0, A4_HEIGHT_PT - 80.0));

    let student_name = document.student_name.to_uppercase();

    canvas.set_fill_color(rgb(NAVY));
    centered_text(&canvas, "CERTIFICATE OF COMPLETION", &helvetica_bold, Face::Bold, 36.0, 100.0);

    canvas.set_fill_color(rgb(BLACK));
    centered_text(&canvas, "This is to certify that", &helvetica, Face::Regular, 16.0, 140.0);

    canvas.set_fill_color(rgb(NAVY));
    centered_text(&canvas, &student_name, &helvetica_bold, Face::Bold, 28.0, 200.0);

    canvas.set_fill_color(rgb(BLACK));
    centered_text(
        &canvas,
        &format!("Registration No: {}", document.student_number),
        &helvetica,
        Face::Regular,
        14.0,
        230.0,
    );
    centered_text(
        &canvas,
        "has successfully completed the course",
        &helvetica,
        Face::Regular,
        16.0,
        280.0,
    );

    canvas.set_fill_color(rgb(NAVY));
    centered_text(&canvas, document.course_title, &helvetica_bold, Face::Bold, 22.0, 320.0);

    canvas.set_fill_color(rgb(BLACK));
    centered_text(
        &canvas,
        &format!("Date of Issue: {}", format_long_date(document.issue_date)),
        &helvetica,
        Face::Regular,
        14.0,
        400.0,
    );
    centered_text(
        &canvas,
        &format!("Certificate No: {}", document.certificate_number),
        &helvetica,
        Face::Regular,
        10.0,
        430.0,
    );

    centered_text(
        &canvas,
        "___________________________",
        &helvetica_bold,
        Face::Bold,
        12.0,
        A4_HEIGHT_PT - 150.0,
    );
    centered_text(
        &canvas,
        document.signatory_title,
        &helvetica_bold,
        Face::Bold,
        12.0,
        A4_HEIGHT_PT - 130.0,
    );

    canvas.set_fill_color(rgb(NAVY));
    centered_text(
        &canvas,
        document.institution_name,
        &helvetica_bold,
        Face::Bold,
        14.0,
        A4_HEIGHT_PT - 80.0,
    );

    doc.save_to_bytes().map_err(|err| PdfError::Render(err.to_string()))
}

#[derive(Debug, Clone, Copy)]
enum Face {
    Regular,
    Bold,
}

fn centered_text(
    canvas: &printpdf::PdfLayerReference,
    text: &str,
    font: &IndirectFontRef,
    face: Face,
    size_pt: f64,
    offset_from_top_pt: f64,
) {
    let width_pt = text_width_pt(text, face, size_pt);
    let x_pt = (A4_WIDTH_PT - width_pt) / 2.0;
    let y_pt = A4_HEIGHT_PT - offset_from_top_pt;
    canvas.use_text(
        text,
        size_pt as f32,
        Mm((x_pt * PT_TO_MM) as f32),
        Mm((y_pt * PT_TO_MM) as f32),
        font,
    );
}

fn rgb((r, g, b): (f64, f64, f64)) -> Color {
    Color::Rgb(Rgb::new(r as f32, g as f32, b as f32, None))
}

fn stroke_rect(x_pt: f64, y_pt: f64, width_pt: f64, height_pt: f64) -> Line {
    let corners = [
        (x_pt, y_pt),
        (x_pt + width_pt, y_pt),
        (x_pt + width_pt, y_pt + height_pt),
        (x_pt, y_pt + height_pt),
    ];

    Line {
        points: corners
            .iter()
            .map(|(x, y)| (Point::new(Mm((x * PT_TO_MM) as f32), Mm((y * PT_TO_MM) as f32)), false))
            .collect(),
        is_closed: true,
    }
}

/// printpdf exposes no metrics for builtin fonts, so centering relies on the
/// standard Adobe AFM advance widths (thousandths of an em, ASCII 32..=126).
fn text_width_pt(text: &str, face: Face, size_pt: f64) -> f64 {
    let widths: i64 = text.chars().map(|ch| glyph_width(ch, face) as i64).sum();
    widths as f64 / 1000.0 * size_pt
}

fn glyph_width(ch: char, face: Face) -> i32 {
    let code = ch as u32;
    if !(32..=126).contains(&code) {
        // Fallback for anything outside the printable ASCII range.
        return 556;
    }
    let index = (code - 32) as usize;
    match face {
        Face::Regular => HELVETICA_WIDTHS[index],
        Face::Bold => HELVETICA_BOLD_WIDTHS[index],
    }
}

const HELVETICA_WIDTHS: [i32; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, 556, 556, 556,
    556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, 1015, 667, 667, 722, 722,
    667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, 667, 778, 722, 667, 611, 722, 667, 944,
    667, 667, 611, 278, 278, 278, 469, 556, 333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222,
    500, 222, 833, 556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334,
    584,
];

const HELVETICA_BOLD_WIDTHS: [i32; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, 556, 556, 556,
    556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611, 975, 722, 722, 722, 722, 667,
    611, 778, 722, 278, 556, 722, 611, 833, 722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667,
    667, 611, 333, 278, 333, 584, 556, 333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556,
    278, 889, 611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

#[cfg(test)]
mod tests {
    use super::*;
    use time::{Date, Month};

    fn sample_document() -> CertificateDocument<'static> {
        CertificateDocument {
            student_name: "Test Student",
            student_number: "STU001",
            course_title: "Paramedical Nursing",
            certificate_number: "TTI-2026-STU001",
            issue_date: Date::from_calendar_date(2026, Month::June, 15).unwrap(),
            institution_name: "Tutora Medical And Technical Institute",
            signatory_title: "Principal's Signature",
        }
    }

    #[test]
    fn render_produces_pdf_bytes() {
        let bytes = render_certificate(&sample_document()).expect("render");
        assert!(bytes.starts_with(b"%PDF"));
        assert!(bytes.len() > 500);
    }

    #[test]
    fn bold_text_is_wider_than_regular() {
        let regular = text_width_pt("CERTIFICATE", Face::Regular, 36.0);
        let bold = text_width_pt("CERTIFICATE", Face::Bold, 36.0);
        assert!(bold > regular);
    }

    #[test]
    fn centered_title_fits_on_page() {
        let width = text_width_pt("CERTIFICATE OF COMPLETION", Face::Bold, 36.0);
        assert!(width < A4_WIDTH_PT);
    }

    #[test]
    fn non_ascii_falls_back_to_default_width() {
        assert_eq!(glyph_width('ф', Face::Regular), 556);
    }
}
