use gdgen_core::{codegen::IntoCode, parse::Datatype};

use super::{
    emit::{GENERATED_BANNER, GdWriter, ToGdScript},
    obsolete::CodegenObsolete,
    property::CodegenProperty,
    sdk::CodegenApi,
};

/// Generates `<Brand><Api>Models.gd`, with one inner class per datatype.
#[derive(Clone, Copy, Debug)]
pub struct CodegenModels<'a> {
    api: &'a CodegenApi<'a>,
}

impl<'a> CodegenModels<'a> {
    pub fn new(api: &'a CodegenApi<'a>) -> Self {
        Self { api }
    }
}

impl ToGdScript for CodegenModels<'_> {
    fn write_gdscript(&self, w: &mut GdWriter) {
        let names = self.api.sdk().names();
        w.doc(&format!(
            "Request, result, and shared models for the {} {} API.",
            names.brand(),
            self.api.name()
        ));
        w.line(GENERATED_BANNER);
        w.line(format_args!("class_name {}", names.models_class(self.api.name())));
        w.line("extends RefCounted");

        for datatype in self.api.datatypes() {
            w.blank().blank();
            CodegenModel::new(self.api, datatype).write_gdscript(w);
        }
    }
}

impl IntoCode for CodegenModels<'_> {
    type Code = (String, String);

    fn into_code(self) -> Self::Code {
        let names = self.api.sdk().names();
        (
            names.script_path(&names.models_class(self.api.name())),
            self.to_gdscript(),
        )
    }
}

/// An inner model class.
#[derive(Clone, Copy, Debug)]
pub struct CodegenModel<'a> {
    api: &'a CodegenApi<'a>,
    datatype: &'a Datatype,
}

impl<'a> CodegenModel<'a> {
    pub fn new(api: &'a CodegenApi<'a>, datatype: &'a Datatype) -> Self {
        Self { api, datatype }
    }

    fn properties(&self) -> impl Iterator<Item = CodegenProperty<'a>> {
        let names = self.api.sdk().names().sanitizer();
        self.datatype
            .properties
            .iter()
            .map(move |property| CodegenProperty::new(names, property))
    }
}

impl ToGdScript for CodegenModel<'_> {
    fn write_gdscript(&self, w: &mut GdWriter) {
        let now = self.api.sdk().now();
        if let Some(description) = &self.datatype.description {
            w.doc(description);
        }
        CodegenObsolete::new(self.datatype.deprecation.as_ref(), now).write_gdscript(w);

        let header = format!("class {} extends RefCounted", self.datatype.name);
        w.block(header, |w| {
            for property in self.properties() {
                if let Some(description) = &property.property().description {
                    w.doc(description);
                }
                CodegenObsolete::new(property.property().deprecation.as_ref(), now)
                    .write_gdscript(w);
                w.line(property.declaration());
            }
            if !self.datatype.properties.is_empty() {
                w.blank();
            }
            w.block("func _init(data: Dictionary = {}) -> void", |w| {
                if self.datatype.properties.is_empty() {
                    w.line("pass");
                }
                for property in self.properties() {
                    w.lines(&property.deserialize_statement());
                }
            });

            w.blank();
            w.block("func to_dict() -> Dictionary", |w| {
                w.line("var result := {}");
                for property in self.properties() {
                    w.line(property.serialize_statement());
                }
                w.line("return result");
            });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use gdgen_core::parse::ApiDescription;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    use crate::{CodegenConfig, CodegenSdk};

    #[test]
    fn test_models_script() {
        let api = ApiDescription::from_yaml(indoc! {"
            name: Client
            datatypes:
              - name: EntityKey
                description: Identifies a single entity.
                properties:
                  - name: Id
                    actualtype: String
                  - name: Type
                    actualtype: String
                    optional: true
              - name: Node
                deprecation:
                  ReplacedBy: EntityKey
                properties:
                  - name: Thread
                    actualtype: String
                    collection: array
                  - name: Key
                    actualtype: EntityKey
              - name: EmptyResult
        "})
        .unwrap();
        let sdk = CodegenSdk::new(CodegenConfig::default()).unwrap();
        let api = sdk.api(&api).unwrap();
        let (path, code) = api.models().into_code();

        assert_eq!(path, "addons/playfab/PlayFabClientModels.gd");
        assert_eq!(
            code,
            indoc! {r#"
                ## Request, result, and shared models for the PlayFab Client API.
                # Generated by gdgen. Do not edit.
                class_name PlayFabClientModels
                extends RefCounted


                ## Identifies a single entity.
                class EntityKey extends RefCounted:
                    var Id: String = ""
                    var Type = null

                    func _init(data: Dictionary = {}) -> void:
                        if data.has("Id"):
                            Id = data["Id"]
                        if data.has("Type"):
                            Type = data["Type"]

                    func to_dict() -> Dictionary:
                        var result := {}
                        result["Id"] = Id
                        result["Type"] = Type
                        return result


                ## [Obsolete: Use 'EntityKey' instead]
                class PlayFabNode extends RefCounted:
                    var Thread_: Array = []
                    var Key: EntityKey = null

                    func _init(data: Dictionary = {}) -> void:
                        if data.has("Thread"):
                            Thread_ = data["Thread"]
                        if data.has("Key"):
                            Key = data["Key"]

                    func to_dict() -> Dictionary:
                        var result := {}
                        result["Thread"] = Thread_
                        result["Key"] = Key
                        return result


                class EmptyResult extends RefCounted:
                    func _init(data: Dictionary = {}) -> void:
                        pass

                    func to_dict() -> Dictionary:
                        var result := {}
                        return result
            "#}
        );
    }
}
