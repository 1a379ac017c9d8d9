use formpack_multipart::{flatten::flatten, FileHandle, FormValue};
use serde_json::json;

#[test]
fn flatten_scalar_formatting_matrix() {
    let form = FormValue::from(json!({
        "s": "text",
        "i": -4,
        "u": u64::MAX,
        "f": 3.5,
        "whole": 2.0,
        "t": true,
        "no": false
    }));
    let payload = flatten(&form);

    assert_eq!(payload.text("s"), Some("text"));
    assert_eq!(payload.text("i"), Some("-4"));
    assert_eq!(payload.text("u"), Some("18446744073709551615"));
    assert_eq!(payload.text("f"), Some("3.5"));
    assert_eq!(payload.text("whole"), Some("2"));
    assert_eq!(payload.text("t"), Some("true"));
    assert_eq!(payload.text("no"), Some("false"));
}

#[test]
fn flatten_nested_object_and_array_keys() {
    let form = FormValue::from(json!({
        "theme": {"accent": "#f0f", "dark": true},
        "links": [
            {"url": "https://a", "label": null},
            {"url": "https://b"}
        ]
    }));
    let payload = flatten(&form);

    let names: Vec<&str> = payload.parts().iter().map(|p| p.name()).collect();
    assert_eq!(
        names,
        [
            "theme[accent]",
            "theme[dark]",
            "links[0][url]",
            "links[1][url]",
        ]
    );
}

#[test]
fn flatten_mixes_files_and_text_in_field_order() {
    let mut form = FormValue::from(json!({
        "name": "x",
        "logo": null,
        "links": [{"image": null, "url": "https://a"}]
    }));
    form.insert(
        "logo",
        FormValue::File(FileHandle::new("l.png", "image/png", vec![1])),
    );
    form.get_mut("links")
        .unwrap()
        .at_mut(0)
        .unwrap()
        .insert(
            "image",
            FormValue::File(FileHandle::new("a.png", "image/png", vec![2])),
        );

    let payload = flatten(&form);
    let names: Vec<&str> = payload.parts().iter().map(|p| p.name()).collect();
    assert_eq!(names, ["name", "logo", "links[0][image]", "links[0][url]"]);
    assert_eq!(payload.file_part_names(), ["logo", "links[0][image]"]);
}

#[test]
fn flatten_deeply_nested_array_of_arrays() {
    let form = FormValue::from(json!({"grid": [[1, 2], [3]]}));
    let payload = flatten(&form);
    let names: Vec<&str> = payload.parts().iter().map(|p| p.name()).collect();
    assert_eq!(names, ["grid[0][0]", "grid[0][1]", "grid[1][0]"]);
    assert_eq!(payload.text("grid[1][0]"), Some("3"));
}
