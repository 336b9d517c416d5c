//! The built-in rule table.
//!
//! Ordered list of every patch applied to a document, reviewable as data
//! (`retouch rules` prints it). Order matters: cleanup rules sit directly
//! after the rule whose artifact they collapse, and guarded insertion rules
//! check a marker that their own replacement writes, so re-running the full
//! set over already-patched files makes no further changes.

use super::rule::{Group, Rule};
use super::rule::Group::{Accessibility, Performance};

/// The default patch set, in application order.
pub static DEFAULT_RULES: &[Rule] = &[
    // Decorative SVGs inside .icon spans are hidden from the accessibility
    // tree. The pattern still matches once the attribute is present (no
    // lookaround in the regex crate), so the dedupe rule below collapses
    // the doubled attribute on re-runs.
    Rule::pattern(
        "icon-svg-aria-hidden",
        Accessibility,
        r#"(<span class="icon">)(<svg )"#,
        r#"$1<svg aria-hidden="true" "#,
    ),
    Rule::literal(
        "icon-svg-dedupe",
        Accessibility,
        r#"aria-hidden="true" aria-hidden="true""#,
        r#"aria-hidden="true""#,
    ),
    // Standalone decorative SVGs (the WhatsApp button icon and friends).
    Rule::pattern(
        "standalone-svg-aria-hidden",
        Accessibility,
        r#"<svg class="(w-\d+ h-\d+ fill-white)" viewBox"#,
        r#"<svg aria-hidden="true" class="$1" viewBox"#,
    ),
    Rule::literal(
        "menu-button-aria",
        Accessibility,
        r#"<button id="menu-btn" class="md:hidden p-1">"#,
        r#"<button id="menu-btn" class="md:hidden p-1" aria-label="Buka menu navigasi" aria-expanded="false">"#,
    ),
    Rule::literal(
        "menu-button-aria-bare",
        Accessibility,
        r#"<button id="menu-btn" class="md:hidden">"#,
        r#"<button id="menu-btn" class="md:hidden" aria-label="Buka menu navigasi" aria-expanded="false">"#,
    ),
    Rule::literal(
        "nav-aria-label-multiline",
        Accessibility,
        "<nav\n      class=\"sticky",
        "<nav\n      aria-label=\"Menu utama\"\n      class=\"sticky",
    ),
    Rule::literal(
        "nav-aria-label",
        Accessibility,
        r#"<nav class="sticky"#,
        r#"<nav aria-label="Menu utama" class="sticky"#,
    ),
    Rule::literal(
        "footer-aria-label",
        Accessibility,
        r#"<footer class="bg-primary"#,
        r#"<footer aria-label="Footer" class="bg-primary"#,
    ),
    // Contact-form labels: associate each known label with its input id.
    Rule::literal(
        "form-label-name",
        Accessibility,
        "<label class=\"block text-sm font-semibold text-primary mb-1.5\"\n                  >Nama Lengkap *</label",
        "<label for=\"cf-name\" class=\"block text-sm font-semibold text-primary mb-1.5\"\n                  >Nama Lengkap *</label",
    ),
    Rule::literal(
        "form-label-company",
        Accessibility,
        "<label class=\"block text-sm font-semibold text-primary mb-1.5\"\n                  >Perusahaan</label",
        "<label for=\"cf-company\" class=\"block text-sm font-semibold text-primary mb-1.5\"\n                  >Perusahaan</label",
    ),
    Rule::literal(
        "form-label-pax",
        Accessibility,
        "<label class=\"block text-sm font-semibold text-primary mb-1.5\"\n                  >Jumlah Peserta</label",
        "<label for=\"cf-pax\" class=\"block text-sm font-semibold text-primary mb-1.5\"\n                  >Jumlah Peserta</label",
    ),
    Rule::literal(
        "form-label-date",
        Accessibility,
        "<label class=\"block text-sm font-semibold text-primary mb-1.5\"\n                  >Tanggal Rencana</label",
        "<label for=\"cf-date\" class=\"block text-sm font-semibold text-primary mb-1.5\"\n                  >Tanggal Rencana</label",
    ),
    Rule::literal(
        "form-label-paket",
        Accessibility,
        "<label class=\"block text-sm font-semibold text-primary mb-1.5\"\n                >Paket yang Diminati</label",
        "<label for=\"cf-paket\" class=\"block text-sm font-semibold text-primary mb-1.5\"\n                >Paket yang Diminati</label",
    ),
    Rule::literal(
        "form-label-msg",
        Accessibility,
        "<label class=\"block text-sm font-semibold text-primary mb-1.5\"\n                >Pesan</label",
        "<label for=\"cf-msg\" class=\"block text-sm font-semibold text-primary mb-1.5\"\n                >Pesan</label",
    ),
    Rule::literal(
        "mobile-nav-menu-role",
        Accessibility,
        r#"<div id="mob-nav" class="md:hidden pb-4">"#,
        r#"<div id="mob-nav" class="md:hidden pb-4" role="menu" aria-label="Menu navigasi mobile">"#,
    ),
    Rule::literal(
        "back-to-top-aria-label",
        Accessibility,
        "class=\"text-xs text-blue-200/40 flex items-center gap-1 hover:text-accent\"\n            >",
        "class=\"text-xs text-blue-200/40 flex items-center gap-1 hover:text-accent\"\n            aria-label=\"Kembali ke atas halaman\"\n            >",
    ),
    Rule::literal(
        "hero-banner-role",
        Accessibility,
        r#"<header class="hero-bg"#,
        r#"<header role="banner" class="hero-bg"#,
    ),
    // Wrap the content sections in a <main> landmark. Each half of the pair
    // forbids the marker it inserts; forbidding `<main>` on both would let
    // the opening rule veto the closing one.
    Rule::literal("main-landmark-open", Accessibility, "<!-- Layanan -->", "<main>")
        .guarded(&[r#"id="layanan""#], &["<main>"]),
    Rule::literal(
        "main-landmark-close",
        Accessibility,
        "<!-- Footer -->",
        "</main>\n    <!-- Footer -->",
    )
    .guarded(&[r#"id="layanan""#], &["</main>"]),
    Rule::literal(
        "form-aria-required",
        Accessibility,
        "required\n",
        "required aria-required=\"true\"\n",
    ),
    Rule::literal(
        "menu-toggle-aria-expanded",
        Accessibility,
        "document\n        .getElementById(\"menu-btn\")\n        .addEventListener(\"click\", () =>\n          document.getElementById(\"mob-nav\").classList.toggle(\"show\"),\n        );",
        "document.getElementById(\"menu-btn\").addEventListener(\"click\",function(){var n=document.getElementById(\"mob-nav\");n.classList.toggle(\"show\");this.setAttribute(\"aria-expanded\",n.classList.contains(\"show\"))});",
    )
    .first(),
    // The guard checks the `skip-link` class the replacement inserts; the
    // anchor's own markup is the idempotence marker.
    Rule::literal(
        "skip-link",
        Accessibility,
        r#"<body class="bg-bg-cream text-slate-800 antialiased">"#,
        "<body class=\"bg-bg-cream text-slate-800 antialiased\">\n    <a href=\"#layanan\" class=\"skip-link\">Langsung ke konten utama</a>",
    )
    .first()
    .guarded(&["<body"], &["skip-link"]),
    Rule::literal(
        "family-gathering-alt",
        Accessibility,
        r#"alt="Family Gathering Private""#,
        r#"alt="Family gathering private di Batu Malang - Gemilang Katun Outbound""#,
    ),
    Rule::literal(
        "trainer-alt",
        Accessibility,
        r#"alt="Trainer Outbound Profesional""#,
        r#"alt="Trainer outbound profesional bersertifikat di Malang""#,
    ),
    // Noscript fallback for the async font stylesheet; only fires while the
    // document has the print/onload hook and no fallback yet.
    Rule::literal(
        "font-noscript-fallback",
        Performance,
        "onload=\"this.media='all'\"/>",
        "onload=\"this.media='all'\"/>\n    <noscript><link href=\"https://fonts.googleapis.com/css2?family=Inter:wght@400;500;600;700;800;900&display=swap\" rel=\"stylesheet\"/></noscript>",
    )
    .guarded(&[r#"media="print" onload="#], &["<noscript>"]),
    Rule::pattern(
        "external-link-noopener",
        Performance,
        r#"target="_blank"(\s*)(class=)"#,
        r#"target="_blank" rel="noopener"$1$2"#,
    ),
    Rule::literal(
        "noopener-dedupe",
        Performance,
        r#"rel="noopener" rel="noopener""#,
        r#"rel="noopener""#,
    ),
];

/// Rules filtered down to the enabled groups, in catalog order.
pub fn enabled_rules(accessibility: bool, performance: bool) -> Vec<Rule> {
    DEFAULT_RULES
        .iter()
        .filter(|rule| match rule.group {
            Group::Accessibility => accessibility,
            Group::Performance => performance,
        })
        .copied()
        .collect()
}
