// ABOUTME: Integration tests driving the decorators end to end from authored markup.
// ABOUTME: Covers the customer-tabs and product-gallery interaction scenarios and the pricing rewrite.

use edgekit_blocks::decorators::{gallery, pricing, tabs};
use edgekit_blocks::{Block, DefaultPictures};

mod customer_tabs_scenario {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn two_row_block_switches_between_page_content_and_placeholder() {
        let block = Block::parse(
            "<div><div>Clientes nuevos</div><div></div></div>\
             <div><div>Ya soy cliente</div><div>active</div></div>",
        )
        .unwrap();
        let section = tabs::SectionRange::from_fragments(vec![
            "<div class=\"cards-wrapper\"><p>Ofertas para ti</p></div>".into(),
            "<div class=\"columns-wrapper\"><p>Fibra y móvil</p></div>".into(),
            "<div class=\"accordion-wrapper\"><p>Preguntas frecuentes</p></div>".into(),
        ]);
        let mut component = tabs::decorate(&block, Some(section));

        // Two buttons, the first active by default.
        let bar = component.render_bar();
        assert_eq!(bar.matches("<button").count(), 2);
        assert!(bar.contains(
            "<button class=\"customer-tabs-btn active\" data-tab=\"0\">Clientes nuevos</button>"
        ));

        // Both page fragments claimed for tab 0 and visible; the synthesized
        // placeholder is hidden (the active-marked row's content is discarded).
        let rendered = component.render_section();
        assert!(rendered[0].contains("customer-tab-0"));
        assert!(!rendered[0].contains("display: none"));
        assert!(rendered[1].contains("customer-tab-0"));
        assert!(rendered[2].contains("<p>Accede a Mi Vodafone.</p>"));
        assert!(rendered[2].contains("display: none"));
        assert!(!rendered[3].contains("customer-tab-content"));

        // Clicking button 1 shows only tab-1 content and hides tab-0.
        component.select(1);
        let bar = component.render_bar();
        assert!(bar.contains("customer-tabs-btn active\" data-tab=\"1\""));
        let rendered = component.render_section();
        assert!(rendered[0].contains("display: none"));
        assert!(rendered[1].contains("display: none"));
        assert!(!rendered[2].contains("display: none"));
    }
}

mod product_gallery_scenario {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn three_image_gallery_selection_moves_main_and_marker() {
        let block = Block::parse(
            "<div><div><picture><img src=\"p1.jpg\" alt=\"frontal\"></picture></div></div>\
             <div><div><picture><img src=\"p2.jpg\" alt=\"trasera\"></picture></div></div>\
             <div><div><picture><img src=\"p3.jpg\" alt=\"lateral\"></picture></div></div>",
        )
        .unwrap();
        let mut component = gallery::decorate(&block).expect("three usable images");
        assert_eq!(component.images().len(), 3);

        let html = component.render(&DefaultPictures);
        let thumbs_at = html.find("product-gallery-thumbs").unwrap();
        assert!(html[..thumbs_at].contains("p1.jpg?width=600"));
        assert!(html[..thumbs_at].contains("loading=\"eager\""));
        assert_eq!(html.matches("product-gallery-thumb").count(), 4); // strip + 3 buttons
        assert_eq!(html.matches("product-gallery-thumb active").count(), 1);

        component.select(2);
        let html = component.render(&DefaultPictures);
        let thumbs_at = html.find("product-gallery-thumbs").unwrap();
        assert!(html[..thumbs_at].contains("p3.jpg?width=600"));
        let active_at = html.find("product-gallery-thumb active").unwrap();
        assert!(html[active_at..].contains("p3.jpg?width=150"));
    }

    #[test]
    fn imageless_block_is_left_untouched() {
        let block = Block::parse("<div><div><p>solo texto</p></div></div>").unwrap();
        assert!(gallery::decorate(&block).is_none());
    }
}

mod pricing_scenario {
    use super::*;

    #[test]
    fn full_card_builds_highlight_price_box_and_optimized_picture() {
        let block = Block::parse(
            "<div>\
               <div><picture><img src=\"tarifa.jpg\" alt=\"Tarifa\"></picture></div>\
               <div>\
                 <p><strong>La más vendida</strong></p>\
                 <p>30€/mes</p>\
                 <p>- Fibra 600Mb + llamadas</p>\
                 <ul><li>Permanencia 12 meses</li></ul>\
                 <p><a href=\"/contratar\">Lo quiero</a></p>\
               </div>\
             </div>",
        )
        .unwrap();
        let html = pricing::decorate(&block, &DefaultPictures);

        assert!(html.starts_with("<ul><li class=\"highlighted\">"));
        assert!(html.contains("<div class=\"cards-pricing-highlight-tab\">La más vendida</div>"));
        assert!(html.contains("cards-pricing-card-image"));
        assert!(html.contains("<p class=\"cards-pricing-amount\">30€/mes</p>"));
        assert!(html.contains("<p class=\"cards-pricing-features\">- Fibra 600Mb + llamadas</p>"));
        assert!(html.contains("<ul><li>Permanencia 12 meses</li></ul>"));
        assert!(html.contains("tarifa.jpg?width=750"));
    }
}
