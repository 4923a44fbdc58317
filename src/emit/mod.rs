//
//  mod.rs
//  urlgen
//
//  Renders endpoints into C# `IUrlHelper` extension methods, spliced into a
//  user-supplied template at a fixed placeholder.
//

pub mod align;

pub use align::{MarkerAligner, NoAlign, TextAligner, ALIGN_MARKER};

use crate::error::{Result, UrlgenError};
use crate::routes::{Endpoint, ParameterBinding};

/// Token in the output template replaced by the generated members.
pub const PLACEHOLDER: &str = "GENERATED_CODE_GOES_HERE";

/// Suffix stripped from type names when naming helpers.
pub const DEFAULT_TYPE_SUFFIX: &str = "Controller";

/// Emitter settings.
#[derive(Debug, Clone)]
pub struct EmitOptions {
    pub type_suffix: String,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            type_suffix: DEFAULT_TYPE_SUFFIX.to_string(),
        }
    }
}

/// An output template split around [`PLACEHOLDER`].
#[derive(Debug, Clone, Copy)]
pub struct OutputTemplate<'a> {
    pub prefix: &'a str,
    pub suffix: &'a str,
}

impl<'a> OutputTemplate<'a> {
    pub fn parse(text: &'a str) -> Result<Self> {
        let idx = text
            .find(PLACEHOLDER)
            .ok_or(UrlgenError::MissingPlaceholder(PLACEHOLDER))?;
        Ok(Self {
            prefix: &text[..idx],
            suffix: &text[idx + PLACEHOLDER.len()..],
        })
    }
}

/// Render `endpoints` into `template` and run the default alignment pass.
pub fn render(endpoints: &[Endpoint<'_>], template: &str, options: &EmitOptions) -> Result<String> {
    render_with(endpoints, template, options, &MarkerAligner::default())
}

/// Render with a caller-chosen alignment pass.
///
/// The template is checked before anything is generated.
pub fn render_with(
    endpoints: &[Endpoint<'_>],
    template: &str,
    options: &EmitOptions,
    aligner: &dyn TextAligner,
) -> Result<String> {
    let template = OutputTemplate::parse(template)?;

    let members = render_members(endpoints, options);

    let mut output = String::with_capacity(template.prefix.len() + members.len() + template.suffix.len());
    output.push_str(template.prefix);
    output.push_str(&members);
    output.push_str(template.suffix);

    Ok(aligner.align(&output))
}

/// Endpoints ordered by (type name, method name); ties keep input order.
pub fn sort_endpoints<'a, 't>(endpoints: &'a [Endpoint<'t>]) -> Vec<&'a Endpoint<'t>> {
    let mut ordered: Vec<&Endpoint<'t>> = endpoints.iter().collect();
    ordered.sort_by(|a, b| {
        a.owner
            .type_name
            .cmp(&b.owner.type_name)
            .then_with(|| a.method_name.cmp(&b.method_name))
    });
    ordered
}

/// Generated members for every endpoint, alignment markers left in place.
pub fn render_members(endpoints: &[Endpoint<'_>], options: &EmitOptions) -> String {
    let mut out = String::new();
    for endpoint in sort_endpoints(endpoints) {
        if endpoint.parameters.is_empty() {
            write_member_no_params(&mut out, endpoint, options);
        } else {
            write_member_with_params(&mut out, endpoint, options);
        }
        out.push('\n');
    }
    out
}

/// `{TypeShort}_{Method}_{VERB}`.
pub fn helper_name(endpoint: &Endpoint<'_>, options: &EmitOptions) -> String {
    let type_name = endpoint.owner.type_name.as_str();
    let short = type_name
        .strip_suffix(options.type_suffix.as_str())
        .unwrap_or(type_name);
    format!("{}_{}_{}", short, endpoint.method_name, endpoint.verb())
}

fn write_member_no_params(out: &mut String, endpoint: &Endpoint<'_>, options: &EmitOptions) {
    let ctrl = &endpoint.owner.type_name;

    write_doc(out, endpoint);
    out.push_str(&format!(
        "\t\tpublic static String {}( this IUrlHelper url ) => url.Action( action: nameof({}.{}), controller: {}.Name );\n",
        helper_name(endpoint, options),
        ctrl,
        endpoint.method_name,
        ctrl
    ));
    out.push('\n');
}

fn write_member_with_params(out: &mut String, endpoint: &Endpoint<'_>, options: &EmitOptions) {
    let ctrl = &endpoint.owner.type_name;
    let params_flat = endpoint
        .parameters
        .iter()
        .map(signature_param)
        .collect::<Vec<_>>()
        .join(", ");

    write_doc(out, endpoint);
    out.push_str(&format!(
        "\t\tpublic static String {}( this IUrlHelper url, {} )\n",
        helper_name(endpoint, options),
        params_flat
    ));
    out.push_str("\t\t{\n");
    out.push_str("\t\t\tRouteValueDictionary dict = new RouteValueDictionary();\n");

    for param in &endpoint.parameters {
        out.push_str(&insertion_line(param));
        out.push('\n');
    }

    out.push('\n');
    out.push_str(&format!(
        "\t\t\treturn url.Action( action: nameof({}.{}), controller: {}.Name, values: dict );\n",
        ctrl, endpoint.method_name, ctrl
    ));
    out.push('\n');
    out.push_str("\t\t}\n");
}

/// Optional parameters become `T? name = default`.
fn signature_param(param: &ParameterBinding) -> String {
    if param.is_optional {
        let nullable = if param.source_type.ends_with('?') {
            param.source_type.clone()
        } else {
            format!("{}?", param.source_type)
        };
        format!("{} {} = default", nullable, param.declared_name)
    } else {
        format!("{} {}", param.source_type, param.declared_name)
    }
}

/// One `dict.Add` statement, guarded unless the value is always present.
///
/// The key is the bound name (`[FromQuery(Name = "..")]` or
/// `[FromRoute(Name = "..")]` when given), not the C# parameter name, so
/// output differs from a key-by-C#-name generator whenever such a name is
/// present. Only the exact spelling `String?` gets the `.IsSet()` guard;
/// `string?` falls through to `!= null`.
fn insertion_line(param: &ParameterBinding) -> String {
    let key = &param.effective_name;
    let name = &param.declared_name;
    let m = ALIGN_MARKER;

    if param.is_query_param && param.source_type == "String?" {
        format!("\t\t\tif( {name}{m}.IsSet() {m}) dict.Add( \"{key}\"{m}, {name} {m});")
    } else if param.source_type.ends_with('?') || param.is_optional {
        format!("\t\t\tif( {name}{m} != null {m}) dict.Add( \"{key}\"{m}, {name} {m});")
    } else {
        format!("\t\t\tdict.Add( \"{key}\", {name} );")
    }
}

/// `/// <summary>` naming the verb, the template and the handling action.
fn write_doc(out: &mut String, endpoint: &Endpoint<'_>) {
    let cref_types = endpoint
        .cref_param_types()
        .iter()
        .map(|t| cref_type(t))
        .collect::<Vec<_>>()
        .join(",");

    out.push_str(&format!(
        "\t\t/// <summary><c>{} {}</c><br />Handled by <c><see cref=\"{}.{}({})\"/></c>.</summary>\n",
        endpoint.verb(),
        endpoint.resolved_template,
        endpoint.owner.type_name,
        endpoint.method_name,
        cref_types
    ));
}

/// Doc-comment crefs spell generic arguments with braces.
fn cref_type(type_text: &str) -> String {
    type_text.replace('<', "{").replace('>', "}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::DeclarationTree;
    use crate::routes::extract_endpoints;
    use std::path::Path;

    const TEMPLATE: &str = "// header\nGENERATED_CODE_GOES_HERE// footer\n";

    fn parse(source: &str) -> DeclarationTree {
        DeclarationTree::parse(Path::new("Controllers/Test.cs"), source).unwrap()
    }

    #[test]
    fn test_missing_placeholder() {
        let err = render(&[], "no token here", &EmitOptions::default()).unwrap_err();
        assert!(matches!(err, UrlgenError::MissingPlaceholder(_)));
    }

    #[test]
    fn test_empty_endpoints_keeps_template() {
        let out = render(&[], TEMPLATE, &EmitOptions::default()).unwrap();
        assert_eq!(out, "// header\n// footer\n");
    }

    #[test]
    fn test_no_params_member() {
        let tree = parse(
            r#"
public class HomeController {
    [HttpGet("")]
    public IActionResult Index() => View();
}
"#,
        );
        let endpoints = extract_endpoints(&tree);
        let out = render(&endpoints, TEMPLATE, &EmitOptions::default()).unwrap();
        let expected = concat!(
            "// header\n",
            "\t\t/// <summary><c>GET </c><br />Handled by <c><see cref=\"HomeController.Index()\"/></c>.</summary>\n",
            "\t\tpublic static String Home_Index_GET( this IUrlHelper url ) => url.Action( action: nameof(HomeController.Index), controller: HomeController.Name );\n",
            "\n",
            "\n",
            "// footer\n",
        );
        assert_eq!(out, expected);
    }

    #[test]
    fn test_widgets_scenario() {
        let tree = parse(
            r#"
public class WidgetsController : Controller {
    [HttpGet("widgets/{id}")]
    public IActionResult Get(Int32 id, Boolean? verbose, [FromBody] Widget body) => Ok();
}
"#,
        );
        let endpoints = extract_endpoints(&tree);
        assert_eq!(endpoints.len(), 1);

        let params = &endpoints[0].parameters;
        assert_eq!(params.len(), 2);
        assert_eq!(params[0].effective_name, "id");
        assert!(!params[0].is_query_param);
        assert!(!params[0].is_optional);
        assert_eq!(params[1].effective_name, "verbose");
        assert!(params[1].is_query_param);
        assert!(params[1].is_optional);

        let out = render(&endpoints, TEMPLATE, &EmitOptions::default()).unwrap();
        let expected = concat!(
            "// header\n",
            "\t\t/// <summary><c>GET widgets/{id}</c><br />Handled by <c><see cref=\"WidgetsController.Get(Int32,Boolean?,Widget)\"/></c>.</summary>\n",
            "\t\tpublic static String Widgets_Get_GET( this IUrlHelper url, Int32 id, Boolean? verbose = default )\n",
            "\t\t{\n",
            "\t\t\tRouteValueDictionary dict = new RouteValueDictionary();\n",
            "\t\t\tdict.Add( \"id\", id );\n",
            "\t\t\tif( verbose != null ) dict.Add( \"verbose\", verbose );\n",
            "\n",
            "\t\t\treturn url.Action( action: nameof(WidgetsController.Get), controller: WidgetsController.Name, values: dict );\n",
            "\n",
            "\t\t}\n",
            "\n",
            "// footer\n",
        );
        assert_eq!(out, expected);
    }

    #[test]
    fn test_insertion_guards_are_aligned() {
        let tree = parse(
            r#"
public class SearchController {
    [HttpGet("search")]
    public IActionResult Find(String? q, Int32? pageNumber, [FromQuery(Name = "s")] String? sort) => Ok();
}
"#,
        );
        let endpoints = extract_endpoints(&tree);
        let raw = render_members(&endpoints, &EmitOptions::default());
        assert!(raw.contains("\t\t\tif( q¦.IsSet() ¦) dict.Add( \"q\"¦, q ¦);"));
        assert!(raw.contains("\t\t\tif( sort¦.IsSet() ¦) dict.Add( \"s\"¦, sort ¦);"));

        let out = render(&endpoints, TEMPLATE, &EmitOptions::default()).unwrap();
        assert!(!out.contains(ALIGN_MARKER));
        let pad = " ".repeat(9);
        let q_line = format!("\t\t\tif( q{pad}.IsSet() ) dict.Add( \"q\"{pad}, q {pad});\n");
        assert!(out.contains(&q_line));
        assert!(out.contains("\t\t\tif( pageNumber != null ) dict.Add( \"pageNumber\", pageNumber );\n"));
    }

    #[test]
    fn test_ordering_and_stability() {
        let tree = parse(
            r#"
public class Beta {
    [HttpGet("z")] public void Z() { }
}
public class Alpha {
    [HttpGet("a")] public void A() { }
}
"#,
        );
        let endpoints = extract_endpoints(&tree);
        let ordered: Vec<String> = sort_endpoints(&endpoints)
            .iter()
            .map(|e| format!("{}.{}", e.owner.type_name, e.method_name))
            .collect();
        assert_eq!(ordered, vec!["Alpha.A", "Beta.Z"]);

        let first = render(&endpoints, TEMPLATE, &EmitOptions::default()).unwrap();
        let second = render(&endpoints, TEMPLATE, &EmitOptions::default()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_helper_names() {
        let tree = parse(
            r#"
[Route("api/orders")]
public class OrdersController {
    [Route("all")] public void List() { }
    [AcceptVerbs("GET", "POST")] public void Both() { }
}
public class Reports {
    [HttpPost("run")] public void Run() { }
}
"#,
        );
        let endpoints = extract_endpoints(&tree);
        let options = EmitOptions::default();
        let names: Vec<String> = sort_endpoints(&endpoints)
            .iter()
            .map(|e| helper_name(e, &options))
            .collect();
        assert_eq!(
            names,
            vec!["Orders_Both_UNSPECIFIED", "Orders_List_ALL", "Reports_Run_POST"]
        );
    }

    #[test]
    fn test_params_array_in_cref_and_signature() {
        let tree = parse(
            r#"
public class ItemsController {
    [HttpPost("items")]
    public IActionResult Post([FromBody] Item item, params string[] tags) => Ok();
}
"#,
        );
        let endpoints = extract_endpoints(&tree);
        assert_eq!(endpoints[0].parameters.len(), 1);
        assert_eq!(endpoints[0].parameters[0].declared_name, "tags");
        assert!(endpoints[0].parameters[0].is_query_param);

        let out = render(&endpoints, TEMPLATE, &EmitOptions::default()).unwrap();
        assert!(out.contains("<see cref=\"ItemsController.Post(Item,string[])\"/>"));
        assert!(out.contains("public static String Items_Post_POST( this IUrlHelper url, string[] tags )\n"));
        assert!(out.contains("\t\t\tdict.Add( \"tags\", tags );\n"));
    }

    #[test]
    fn test_equal_keys_keep_discovery_order() {
        let tree = parse(
            r#"
public class ItemsController {
    [HttpPost("b")]
    [HttpGet("a")]
    public void Save(Int32 id) { }

    [HttpDelete("c")]
    public void Save(String name) { }
}
public class AlphaController {
    [HttpGet("z")] public void Zed() { }
}
"#,
        );
        let endpoints = extract_endpoints(&tree);
        let out = render(&endpoints, TEMPLATE, &EmitOptions::default()).unwrap();

        let helpers: Vec<&str> = out
            .lines()
            .filter_map(|line| line.trim_start().strip_prefix("public static String "))
            .filter_map(|rest| rest.split('(').next())
            .map(str::trim)
            .collect();
        assert_eq!(
            helpers,
            vec!["Alpha_Zed_GET", "Items_Save_POST", "Items_Save_GET", "Items_Save_DELETE"]
        );

        let summaries: Vec<&str> = out
            .lines()
            .filter(|line| line.contains("<see cref=\"ItemsController.Save("))
            .filter_map(|line| line.split("<c>").nth(1))
            .filter_map(|rest| rest.split("</c>").next())
            .collect();
        assert_eq!(summaries, vec!["POST b", "GET a", "DELETE c"]);
    }

    #[test]
    fn test_lowercase_string_uses_null_guard() {
        let tree = parse(
            r#"
public class SearchController {
    [HttpGet("search")]
    public IActionResult Find(string? q) => Ok();
}
"#,
        );
        let endpoints = extract_endpoints(&tree);
        let raw = render_members(&endpoints, &EmitOptions::default());
        assert!(raw.contains("\t\t\tif( q¦ != null ¦) dict.Add( \"q\"¦, q ¦);"));
        assert!(!raw.contains(".IsSet()"));
    }

    #[test]
    fn test_generic_cref_types() {
        assert_eq!(cref_type("List<Int32>"), "List{Int32}");
        assert_eq!(cref_type("Int32?"), "Int32?");
    }
}
