// src/services/reports.rs

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use genpdf::{elements, style, Element};

use crate::{
    common::error::AppError,
    db::MovementRepository,
    models::inventory::{category_filter, MovementType, MovementWithProduct},
};

/// Família procurada em `REPORT_FONTS_DIR` (Roboto-Regular.ttf, Roboto-Bold.ttf, ...).
pub const REPORT_FONT_FAMILY: &str = "Roboto";

const REMOVED_PRODUCT: &str = "Produto removido";

/// Filtro de categoria em memória sobre as linhas já unidas ao produto.
/// Movimentações de produtos excluídos nunca batem com uma categoria.
pub fn filter_by_category(
    movements: Vec<MovementWithProduct>,
    category: Option<&str>,
) -> Vec<MovementWithProduct> {
    match category_filter(category) {
        None => movements,
        Some(category) => movements
            .into_iter()
            .filter(|m| m.product.as_ref().is_some_and(|p| p.category == category))
            .collect(),
    }
}

/// Linha "Tipo: ... | Categoria: ..." do cabeçalho do PDF.
pub fn filter_summary(movement_type: Option<MovementType>, category: Option<&str>) -> String {
    format!(
        "Tipo: {} | Categoria: {}",
        movement_type.map(MovementType::label).unwrap_or("Todos"),
        category_filter(category).unwrap_or("Todas")
    )
}

/// Colunas: data, tipo, produto, categoria, quantidade, descrição.
pub fn report_row(movement: &MovementWithProduct) -> [String; 6] {
    let m = &movement.movement;
    let (product, category, quantity) = match &movement.product {
        Some(p) => (
            format!("{} ({})", p.name, p.sku),
            p.category.clone(),
            format!("{} {}", m.quantity.normalize(), p.unit),
        ),
        None => (REMOVED_PRODUCT.to_string(), "-".to_string(), m.quantity.normalize().to_string()),
    };

    [
        m.created_at.format("%d/%m/%Y %H:%M").to_string(),
        m.movement_type.label().to_string(),
        product,
        category,
        quantity,
        m.description.clone(),
    ]
}

/// Monta o PDF do log de movimentações já filtrado.
pub fn render_movement_log(
    fonts_dir: &Path,
    summary: &str,
    movements: &[MovementWithProduct],
    generated_at: DateTime<Utc>,
) -> Result<Vec<u8>, AppError> {
    let font_family = genpdf::fonts::from_files(fonts_dir, REPORT_FONT_FAMILY, None)
        .map_err(|_| AppError::FontNotFound(fonts_dir.display().to_string()))?;

    let mut doc = genpdf::Document::new(font_family);
    doc.set_title("Relatório de Movimentações");
    let mut decorator = genpdf::SimplePageDecorator::new();
    decorator.set_margins(10);
    doc.set_page_decorator(decorator);

    doc.push(elements::Paragraph::new("RELATÓRIO DE MOVIMENTAÇÕES")
        .styled(style::Style::new().bold().with_font_size(16)));
    doc.push(elements::Paragraph::new(summary.to_string())
        .styled(style::Style::new().with_font_size(10)));
    doc.push(elements::Paragraph::new(format!(
        "Gerado em {} | {} registro(s)",
        generated_at.format("%d/%m/%Y %H:%M"),
        movements.len()
    ))
    .styled(style::Style::new().italic().with_font_size(8)));

    doc.push(elements::Break::new(1.5));

    let mut table = elements::TableLayout::new(vec![2, 1, 3, 2, 2, 4]);
    table.set_cell_decorator(elements::FrameCellDecorator::new(true, true, false));

    let bold = style::Style::new().bold().with_font_size(9);
    let mut header = table.row();
    for title in ["Data", "Tipo", "Produto", "Categoria", "Qtd", "Descrição"] {
        header.push_element(elements::Paragraph::new(title).styled(bold));
    }
    header.push().map_err(pdf_error)?;

    let cell = style::Style::new().with_font_size(8);
    for movement in movements {
        let mut row = table.row();
        for value in report_row(movement) {
            row.push_element(elements::Paragraph::new(value).styled(cell));
        }
        row.push().map_err(pdf_error)?;
    }

    doc.push(table);

    let mut buffer = Vec::new();
    doc.render(&mut buffer).map_err(pdf_error)?;
    Ok(buffer)
}

fn pdf_error(e: genpdf::error::Error) -> AppError {
    AppError::InternalServerError(anyhow::Error::msg(e.to_string()))
}

#[derive(Clone)]
pub struct ReportService {
    movement_repo: MovementRepository,
    fonts_dir: PathBuf,
}

impl ReportService {
    pub fn new(movement_repo: MovementRepository) -> Self {
        Self { movement_repo, fonts_dir: PathBuf::from("./fonts") }
    }

    pub fn with_fonts_dir(mut self, fonts_dir: PathBuf) -> Self {
        self.fonts_dir = fonts_dir;
        self
    }

    pub async fn movements(
        &self,
        movement_type: Option<&str>,
        category: Option<&str>,
    ) -> Result<Vec<MovementWithProduct>, AppError> {
        let movement_type = parse_type_filter(movement_type)?;
        self.filtered(movement_type, category).await
    }

    /// Mesmo log de `movements`, exportado em PDF.
    pub async fn movements_pdf(
        &self,
        movement_type: Option<&str>,
        category: Option<&str>,
        generated_at: DateTime<Utc>,
    ) -> Result<Vec<u8>, AppError> {
        let movement_type = parse_type_filter(movement_type)?;
        let movements = self.filtered(movement_type, category).await?;
        let summary = filter_summary(movement_type, category);
        let fonts_dir = self.fonts_dir.clone();

        // genpdf é CPU-bound: roda fora do executor assíncrono
        let pdf = tokio::task::spawn_blocking(move || {
            render_movement_log(&fonts_dir, &summary, &movements, generated_at)
        })
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task do PDF: {}", e))??;

        tracing::info!("📄 PDF de movimentações gerado ({} bytes)", pdf.len());
        Ok(pdf)
    }

    async fn filtered(
        &self,
        movement_type: Option<MovementType>,
        category: Option<&str>,
    ) -> Result<Vec<MovementWithProduct>, AppError> {
        let rows = self.movement_repo.list_with_products(movement_type).await?;
        let movements = rows.into_iter().map(MovementWithProduct::from).collect();

        Ok(filter_by_category(movements, category))
    }
}

fn parse_type_filter(raw: Option<&str>) -> Result<Option<MovementType>, AppError> {
    MovementType::parse_filter(raw).map_err(|other| {
        tracing::debug!("Tipo de movimentação desconhecido: {}", other);
        AppError::field("type", "invalid", "Tipo deve ser 'entrada', 'saída' ou 'Todos'.")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::inventory::{Movement, ProductSummary, ALL_CATEGORIES};
    use chrono::Utc;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    fn movement(category: Option<&str>) -> MovementWithProduct {
        MovementWithProduct {
            movement: Movement {
                id: Uuid::new_v4(),
                movement_type: MovementType::Out,
                quantity: Decimal::ONE,
                description: String::new(),
                product_id: category.map(|_| Uuid::new_v4()),
                responsible_id: None,
                created_at: Utc::now(),
            },
            product: category.map(|c| ProductSummary {
                name: "Item".into(),
                unit: "un".into(),
                category: c.into(),
                sku: "X".into(),
                quantity: Decimal::TEN,
            }),
        }
    }

    #[test]
    fn category_filter_keeps_only_matching_products() {
        let rows = vec![movement(Some("Limpeza")), movement(Some("Papelaria")), movement(None)];
        let filtered = filter_by_category(rows, Some("Limpeza"));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].product.as_ref().unwrap().category, "Limpeza");
    }

    #[test]
    fn pdf_rows_and_header_describe_the_filtered_log() {
        let row = report_row(&movement(Some("Limpeza")));
        assert_eq!(row[1], "Saída");
        assert_eq!(row[2], "Item (X)");
        assert_eq!(row[3], "Limpeza");
        assert_eq!(row[4], "1 un");

        let orphan = report_row(&movement(None));
        assert_eq!(orphan[2], REMOVED_PRODUCT);
        assert_eq!(orphan[4], "1");

        assert_eq!(
            filter_summary(Some(MovementType::In), Some("Limpeza")),
            "Tipo: Entrada | Categoria: Limpeza"
        );
        assert_eq!(filter_summary(None, Some(ALL_CATEGORIES)), "Tipo: Todos | Categoria: Todas");
    }

    #[test]
    fn pdf_without_fonts_reports_missing_font() {
        let dir = std::env::temp_dir().join(format!("sem-fontes-{}", Uuid::new_v4()));
        let err = render_movement_log(&dir, "Tipo: Todos", &[movement(None)], Utc::now()).unwrap_err();
        assert!(matches!(err, AppError::FontNotFound(_)));
    }

    #[test]
    fn unknown_type_filter_is_a_validation_error() {
        assert!(matches!(parse_type_filter(Some("transferência")), Err(AppError::ValidationError(_))));
        assert_eq!(parse_type_filter(Some("saida")).unwrap(), Some(MovementType::Out));
    }

    #[test]
    fn all_categories_label_disables_filter() {
        let rows = vec![movement(Some("Limpeza")), movement(None)];
        assert_eq!(filter_by_category(rows, Some(ALL_CATEGORIES)).len(), 2);
    }
}
