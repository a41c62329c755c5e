use crate::export::ExportReport;
use crate::types::*;

/// Calculate statistics for an export, partial or complete
pub fn calculate_statistics(report: &ExportReport) -> ExportStatistics {
    let (pages, scaled_height, blank_tail) = match &report.document {
        Some(document) => {
            let blank_tail = document
                .pages
                .last()
                .map(|page| (page.drawable_height - page.image_crop_height).max(0.0))
                .unwrap_or(0.0);
            (document.page_count(), document.scaled_height(), blank_tail)
        }
        None => (0, 0.0, 0.0),
    };

    ExportStatistics {
        sections: report.sections.len(),
        sections_produced: report.produced_count(),
        pages,
        slides: report.deck.slide_count(),
        scaled_height,
        blank_tail,
    }
}
