use std::path::Path;

fn main() {
    let catalog_path = Path::new("catalogs/emission_lines.json");
    validate_catalog_file(catalog_path);
    set_build_dependencies();
}

fn validate_catalog_file(catalog_path: &Path) {
    // Ensure catalog exists at build time
    assert!(
        catalog_path.exists(),
        "\n\nCATALOG BUILD ERROR: File not found\n\
         Path: {}\n\
         Please create the catalog file before building.\n",
        catalog_path.display()
    );

    let catalog_contents = std::fs::read_to_string(catalog_path).unwrap_or_else(|e| {
        panic!(
            "\n\nCATALOG BUILD ERROR: Failed to read file\n\
             Path: {}\n\
             Error: {e}\n",
            catalog_path.display()
        );
    });

    let catalog: serde_json::Value = serde_json::from_str(&catalog_contents).unwrap_or_else(|e| {
        panic!(
            "\n\nCATALOG BUILD ERROR: Invalid JSON\n\
             Path: {}\n\
             Error: {e}\n\
             Hint: Check for missing commas, brackets, or invalid syntax.\n",
            catalog_path.display()
        );
    });

    validate_catalog_structure(&catalog);
}

fn validate_catalog_structure(catalog: &serde_json::Value) {
    assert!(
        catalog.is_object(),
        "\n\nCATALOG BUILD ERROR: Root must be a JSON object\n\
         Got: {catalog}\n"
    );

    let lists = catalog.get("lists").unwrap_or_else(|| {
        panic!(
            "\n\nCATALOG BUILD ERROR: Missing 'lists' field\n\
             The catalog must have a top-level 'lists' array.\n"
        );
    });

    let lists = lists.as_array().unwrap_or_else(|| {
        panic!(
            "\n\nCATALOG BUILD ERROR: 'lists' must be an array\n\
             Got: {lists}\n"
        );
    });

    let total_lines = validate_lists(lists);

    println!(
        "cargo:warning=Validated catalog: {} line lists, {total_lines} total lines",
        lists.len()
    );
}

fn validate_lists(lists: &[serde_json::Value]) -> usize {
    let mut total_lines = 0;

    for (i, list) in lists.iter().enumerate() {
        let list_id = list
            .get("id")
            .and_then(|v| v.as_str())
            .unwrap_or("<unknown>");

        assert!(
            list.get("id").is_some(),
            "\n\nCATALOG BUILD ERROR: Line list at index {i} missing 'id' field\n"
        );
        assert!(
            list.get("display_name").is_some(),
            "\n\nCATALOG BUILD ERROR: Line list '{list_id}' (index {i}) missing 'display_name' field\n"
        );

        let lines = list
            .get("lines")
            .and_then(|l| l.as_array())
            .unwrap_or_else(|| {
                panic!(
                    "\n\nCATALOG BUILD ERROR: Line list '{list_id}' (index {i}) missing 'lines' array\n"
                )
            });

        // Ratio matching needs at least one pair
        assert!(
            lines.len() >= 2,
            "\n\nCATALOG BUILD ERROR: Line list '{list_id}' has {} lines, at least 2 are required\n",
            lines.len()
        );

        for (j, line) in lines.iter().enumerate() {
            validate_line_fields(line, list_id, j);
        }
        total_lines += lines.len();
    }

    total_lines
}

fn validate_line_fields(line: &serde_json::Value, list_id: &str, index: usize) {
    let line_name = line
        .get("name")
        .and_then(|v| v.as_str())
        .unwrap_or("<unknown>");

    assert!(
        line.get("name").is_some(),
        "\n\nCATALOG BUILD ERROR: Line list '{list_id}' line {index} missing 'name' field\n"
    );

    let wavelength = line
        .get("wavelength")
        .and_then(serde_json::Value::as_f64)
        .unwrap_or_else(|| {
            panic!(
                "\n\nCATALOG BUILD ERROR: Line list '{list_id}' line '{line_name}' (index {index}) missing numeric 'wavelength' field\n"
            )
        });

    assert!(
        wavelength.is_finite() && wavelength > 0.0,
        "\n\nCATALOG BUILD ERROR: Line list '{list_id}' line '{line_name}' has wavelength {wavelength}\n\
         Wavelengths must be positive.\n"
    );
}

fn set_build_dependencies() {
    // Tell cargo to rerun if catalog changes
    println!("cargo:rerun-if-changed=catalogs/emission_lines.json");

    // Tell cargo to rerun if build.rs changes
    println!("cargo:rerun-if-changed=build.rs");
}
