//! Borehole construction method: drilling method, rig and cutting tool.

use crate::codes::CodeTables;
use crate::error::Result;
use crate::format::format_number;
use crate::ids::IdRegistry;
use crate::objects::Element;
use crate::record::Drilling;

/// Builds the `constructionMethod` property of a borehole.
pub struct ConstructionBuilder<'a> {
    ids: &'a IdRegistry,
    codes: &'a CodeTables,
}

impl<'a> ConstructionBuilder<'a> {
    /// Creates a builder.
    pub fn new(ids: &'a IdRegistry, codes: &'a CodeTables) -> Self {
        Self { ids, codes }
    }

    /// Builds the construction method covering `[start_depth, end_depth]`
    /// along the borehole's linear reference system.
    ///
    /// Unknown method or tool codes are errors.
    pub fn build(&self, drilling: &Drilling, start_depth: f64, end_depth: f64) -> Result<Element> {
        let method_name = self.codes.drilling_method(&drilling.method)?;

        let method = Element::new("BoreholeConstructionMethod")
            .with_id(self.ids.construction_method())
            .with_child(Element::text_element("gml:name", method_name))
            .with_child(self.location(start_depth, end_depth))
            .with_optional_child(self.drill_rig(drilling))
            .with_optional_child(self.cutting_tool(drilling)?);

        Ok(Element::wrap("constructionMethod", method))
    }

    fn location(&self, start_depth: f64, end_depth: f64) -> Element {
        let pos_list = Element::new("gml:posList")
            .with_attr("srsName", self.ids.srs_name())
            .with_attr("srsDimension", "1")
            .with_text(format!(
                "{} {}",
                format_number(start_depth),
                format_number(end_depth)
            ));

        Element::wrap(
            "location",
            Element::new("LinearExtent")
                .with_id(self.ids.construction_extent())
                .with_child(pos_list),
        )
    }

    fn drill_rig(&self, drilling: &Drilling) -> Option<Element> {
        let machine = drilling
            .machine_ref
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())?;

        Some(Element::wrap(
            "constructionEquipment",
            Element::new("DrillRig")
                .with_id(self.ids.drill_rig(machine))
                .with_child(Element::text_element("gml:name", machine)),
        ))
    }

    fn cutting_tool(&self, drilling: &Drilling) -> Result<Option<Element>> {
        let tool = match drilling.tool.as_deref().map(str::trim) {
            Some(tool) if !tool.is_empty() => tool,
            _ => return Ok(None),
        };

        let diameter = drilling
            .tool_diameter
            .as_ref()
            .filter(|d| !d.value.trim().is_empty())
            .map(|d| {
                let element = Element::text_element("toolOuterDiameter", d.value.trim());
                match d.unit.as_deref() {
                    Some(unit) => element.with_attr("uom", self.codes.normalize_unit(unit)),
                    None => element,
                }
            });

        let cutting_tool = Element::new("CuttingTool")
            .with_child(Element::text_element(
                "gml:name",
                self.codes.drilling_tool(tool)?,
            ))
            .with_optional_child(diameter);

        Ok(Some(Element::wrap("cuttingToolInfo", cutting_tool)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::record::Measure;

    fn build(drilling: &Drilling) -> Result<Element> {
        let ids = IdRegistry::new("log.bor", "P1", "BH1");
        let codes = CodeTables::new();
        ConstructionBuilder::new(&ids, &codes).build(drilling, 0.5, 120.5)
    }

    #[test]
    fn test_method_and_location() {
        let element = build(&Drilling::with_method("ROTARY")).unwrap();
        let method = element.child("BoreholeConstructionMethod").unwrap();

        assert_eq!(method.id(), Some("cm_bh_BH1"));
        assert_eq!(
            method.child("gml:name").and_then(|e| e.text()).as_deref(),
            Some("Rotary drilling")
        );

        let pos_list = method.find("location/LinearExtent/gml:posList").unwrap();
        assert_eq!(pos_list.attr("srsName"), Some("#lr_bh_BH1"));
        assert_eq!(pos_list.attr("srsDimension"), Some("1"));
        assert_eq!(pos_list.text().as_deref(), Some("0.5 120.5"));
    }

    #[test]
    fn test_optional_elements_absent() {
        let element = build(&Drilling::with_method("ROTARY")).unwrap();
        let method = element.child("BoreholeConstructionMethod").unwrap();
        assert!(method.child("constructionEquipment").is_none());
        assert!(method.child("cuttingToolInfo").is_none());
    }

    #[test]
    fn test_rig_and_tool() {
        let drilling = Drilling {
            method: "ROTOPERC".to_string(),
            machine_ref: Some("Rig 7".to_string()),
            tool: Some("TRICONE".to_string()),
            tool_diameter: Some(Measure::with_unit("4.5", "inch")),
        };
        let element = build(&drilling).unwrap();
        let method = element.child("BoreholeConstructionMethod").unwrap();

        let rig = method.find("constructionEquipment/DrillRig").unwrap();
        assert_eq!(rig.id(), Some("rig_Rig_7"));

        let tool = method.find("cuttingToolInfo/CuttingTool").unwrap();
        assert_eq!(
            tool.child("gml:name").and_then(|e| e.text()).as_deref(),
            Some("Tricone bit")
        );
        let diameter = tool.child("toolOuterDiameter").unwrap();
        assert_eq!(diameter.attr("uom"), Some("in"));
        assert_eq!(diameter.text().as_deref(), Some("4.5"));

        let names: Vec<_> = method.children().iter().map(Element::name).collect();
        assert_eq!(
            names,
            vec![
                "gml:name",
                "location",
                "constructionEquipment",
                "cuttingToolInfo"
            ]
        );
    }

    #[test]
    fn test_diameter_without_tool_is_ignored() {
        let drilling = Drilling {
            tool_diameter: Some(Measure::with_unit("64", "mm")),
            ..Drilling::with_method("CORE")
        };
        let element = build(&drilling).unwrap();
        assert!(element.find("BoreholeConstructionMethod/cuttingToolInfo").is_none());
    }

    #[test]
    fn test_unknown_method() {
        let result = build(&Drilling::with_method("WASHBORE"));
        assert!(matches!(result, Err(Error::UnknownDrillingMethod(ref c)) if c == "WASHBORE"));
    }

    #[test]
    fn test_unknown_tool() {
        let drilling = Drilling {
            tool: Some("SPOON".to_string()),
            ..Drilling::with_method("ROTARY")
        };
        assert!(matches!(
            build(&drilling),
            Err(Error::UnknownDrillingTool(ref c)) if c == "SPOON"
        ));
    }
}
