pub const PHPSTAN_NEON: &str = include_str!("../stubs/phpstan.neon");
pub const CI_WORKFLOW_YML: &str = include_str!("../stubs/.github/workflows/ci.yml");
pub const PEST_PHP: &str = include_str!("../stubs/tests/Pest.php");

/// The VitePress site copied into `docs-site/`, keyed by path relative to it.
pub const DOCS_SITE_FILES: &[(&str, &str)] = &[
    (
        ".vitepress/config.ts",
        include_str!("../stubs/docs-site/.vitepress/config.ts"),
    ),
    ("index.md", include_str!("../stubs/docs-site/index.md")),
    (
        "getting-started/index.md",
        include_str!("../stubs/docs-site/getting-started/index.md"),
    ),
    (
        "architecture/index.md",
        include_str!("../stubs/docs-site/architecture/index.md"),
    ),
    (
        "patterns/index.md",
        include_str!("../stubs/docs-site/patterns/index.md"),
    ),
    (
        "patterns/actions.md",
        include_str!("../stubs/docs-site/patterns/actions.md"),
    ),
    (
        "patterns/dtos.md",
        include_str!("../stubs/docs-site/patterns/dtos.md"),
    ),
    (
        "patterns/services.md",
        include_str!("../stubs/docs-site/patterns/services.md"),
    ),
];
