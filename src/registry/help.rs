//! Command signatures and help texts
//!
//! Used by completion and hover. Help texts may mention other commands as
//! `\name`; consumers turn those mentions into classified fragments.

use std::collections::HashMap;
use std::sync::LazyLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HelpEntry {
    pub command: &'static str,
    /// Parameter signature, empty for commands without parameters
    pub signature: &'static str,
    pub text: &'static str,
}

const fn help(command: &'static str, signature: &'static str, text: &'static str) -> HelpEntry {
    HelpEntry {
        command,
        signature,
        text,
    }
}

const HELP: &[HelpEntry] = &[
    // Structural indicators
    help("addtogroup", "<name> [(title)]", "Adds the documented entities to the group <name>. Unlike \\defgroup, using the same name twice is not an error."),
    help("callgraph", "", "Generates a call graph for the function or method, if the dot tool is available."),
    help("hidecallgraph", "", "Suppresses the call graph of the function or method."),
    help("callergraph", "", "Generates a caller graph for the function or method, if the dot tool is available."),
    help("hidecallergraph", "", "Suppresses the caller graph of the function or method."),
    help("showrefby", "", "Lists the functions and methods referencing this entity."),
    help("hiderefby", "", "Suppresses the list of functions and methods referencing this entity."),
    help("showrefs", "", "Lists the functions and methods this entity references."),
    help("hiderefs", "", "Suppresses the list of functions and methods this entity references."),
    help("showinlinesource", "", "Shows the body of the function inline in the documentation."),
    help("hideinlinesource", "", "Suppresses the inline body of the function."),
    help("includegraph", "", "Generates the include dependency graph of the file."),
    help("hideincludegraph", "", "Suppresses the include dependency graph of the file."),
    help("includedbygraph", "", "Generates the graph of files including this file."),
    help("hideincludedbygraph", "", "Suppresses the graph of files including this file."),
    help("directorygraph", "", "Generates the dependency graph of the directory."),
    help("hidedirectorygraph", "", "Suppresses the dependency graph of the directory."),
    help("collaborationgraph", "", "Generates the collaboration graph of the class."),
    help("hidecollaborationgraph", "", "Suppresses the collaboration graph of the class."),
    help("inheritancegraph", "['{option}']", "Generates the inheritance graph of the class. The option is one of NO, YES, TEXT, GRAPH or BUILTIN."),
    help("hideinheritancegraph", "", "Suppresses the inheritance graph of the class."),
    help("groupgraph", "", "Generates the dependency graph of the group."),
    help("hidegroupgraph", "", "Suppresses the dependency graph of the group."),
    help("category", "<name> [<header-file>] [<header-name>]", "Documents an Objective-C category. Similar to \\class."),
    help("class", "<name> [<header-file>] [<header-name>]", "Indicates that the comment block documents the class <name>."),
    help("concept", "<name>", "Indicates that the comment block documents the C++20 concept <name>."),
    help("def", "<name>", "Indicates that the comment block documents the #define macro <name>."),
    help("defgroup", "<name> (group title)", "Defines the group <name> with the given title. Use \\ingroup or \\addtogroup to add members."),
    help("dir", "[<path fragment>]", "Indicates that the comment block documents a directory."),
    help("enum", "<name>", "Indicates that the comment block documents the enumeration <name>."),
    help("example", "['{lineno}'] <file-name>", "Indicates that the comment block documents a source code example. See also \\include."),
    help("endinternal", "", "Ends a block started with \\internal."),
    help("extends", "<name>", "Indicates an inheritance relation when the language has none, e.g. in C."),
    help("file", "[<name>]", "Indicates that the comment block documents the source or header file <name>."),
    help("fileinfo", "['{'option'}']", "Inserts information about the current file name. The option is one of name, extension, filename, directory or full."),
    help("lineinfo", "", "Inserts the current line number."),
    help("fn", "(function declaration)", "Indicates that the comment block documents a function, either global or a member."),
    help("headerfile", "<header-file> [<header-name>]", "Names the header file to include for a class, struct or union."),
    help("hideinitializer", "", "Shows the default value of a define or variable as a single value, hiding the initializer."),
    help("idlexcept", "<name>", "Indicates that the comment block documents the IDL exception <name>."),
    help("implements", "<name>", "Indicates an implementation relation when the language has none."),
    help("ingroup", "(<groupname> [<groupname> <groupname>])", "Makes the documented entity a member of the given group. See \\defgroup."),
    help("interface", "<name> [<header-file>] [<header-name>]", "Indicates that the comment block documents the interface <name>."),
    help("internal", "", "Starts a block of documentation meant for internal use only. Ends at \\endinternal or the end of the comment."),
    help("mainpage", "[(title)]", "Customizes the index page of the generated documentation."),
    help("memberof", "<name>", "Makes a function a member of the class <name>, similar to \\relates."),
    help("module", "<name>", "Indicates that the comment block documents the C++20 module <name>."),
    help("name", "[(header)]", "Turns a member group into a named group. Only valid inside a member group."),
    help("namespace", "<name>", "Indicates that the comment block documents the namespace <name>."),
    help("nosubgrouping", "", "Prevents the public, protected and private sections of a class from being subgrouped."),
    help("overload", "[(function declaration)]", "Generates the standard text for an overloaded member function."),
    help("package", "<name>", "Indicates that the comment block documents the Java package <name>."),
    help("page", "<name> (title)", "Indicates that the comment block is a page with the given name and title. See also \\subpage."),
    help("private", "", "Marks the documented member as private."),
    help("privatesection", "", "Starts a section of private members, like the private: keyword in C++."),
    help("property", "(qualified property name)", "Indicates that the comment block documents a property."),
    help("protected", "", "Marks the documented member as protected."),
    help("protectedsection", "", "Starts a section of protected members."),
    help("protocol", "<name> [<header-file>] [<header-name>]", "Documents an Objective-C protocol. Similar to \\class."),
    help("public", "", "Marks the documented member as public."),
    help("publicsection", "", "Starts a section of public members."),
    help("pure", "", "Marks the documented member as pure virtual."),
    help("relates", "<name>", "Places the documentation of a non-member function on the page of the class <name>."),
    help("related", "<name>", "Equivalent to \\relates."),
    help("relatesalso", "<name>", "Like \\relates, but the function also stays documented in its own scope."),
    help("relatedalso", "<name>", "Equivalent to \\relatesalso."),
    help("showinitializer", "", "Shows the full initializer of a define or variable."),
    help("static", "", "Marks the documented member as static."),
    help("struct", "<name> [<header-file>] [<header-name>]", "Indicates that the comment block documents the struct <name>."),
    help("typedef", "(typedef declaration)", "Indicates that the comment block documents a typedef."),
    help("union", "<name> [<header-file>] [<header-name>]", "Indicates that the comment block documents the union <name>."),
    help("var", "(variable declaration)", "Indicates that the comment block documents a variable or enum value."),
    help("weakgroup", "<name> [(title)]", "Like \\addtogroup, with a lower priority when resolving conflicting group definitions."),
    // Section indicators
    help("attention", "{ attention text }", "Starts a paragraph for a message that needs attention."),
    help("author", "{ list of authors }", "Starts a paragraph naming one or more authors."),
    help("authors", "{ list of authors }", "Equivalent to \\author."),
    help("brief", "{ brief description }", "Starts a paragraph that serves as a brief description."),
    help("bug", "{ bug description }", "Starts a paragraph describing one or more bugs. Items are collected on a global bug list."),
    help("cond", "[(section-label)]", "Starts a conditional section that ends at \\endcond. Included only if the label is enabled."),
    help("copyright", "{ copyright description }", "Starts a paragraph describing the copyright of an entity."),
    help("date", "{ date description }", "Starts a paragraph with one or more dates."),
    help("showdate", "\"<format>\" [ <date_time> ]", "Shows a date and time formatted with <format>."),
    help("deprecated", "{ description }", "Starts a paragraph marking the entity as deprecated. Items are collected on a global deprecated list."),
    help("details", "{ detailed description }", "Starts the detailed description."),
    help("noop", "( text to be ignored )", "Ignores the rest of the line."),
    help("raisewarning", "( text to be shown as warning )", "Shows the rest of the line as a warning message during generation."),
    help("else", "", "Starts the alternative of an \\if or \\ifnot section."),
    help("elseif", "(section-label)", "Starts a conditional section if the previous condition was not enabled."),
    help("endcond", "", "Ends a conditional section started with \\cond."),
    help("endif", "", "Ends a conditional section started with \\if or \\ifnot."),
    help("exception", "<exception-object> { exception description }", "Starts the description of an exception the function may throw. Equivalent to \\throw."),
    help("if", "(section-label)", "Starts a conditional section that ends at \\endif. See also \\else and \\elseif."),
    help("ifnot", "(section-label)", "Starts a conditional section that is included if the label is not enabled."),
    help("invariant", "{ description of invariant }", "Starts a paragraph describing an invariant."),
    help("note", "{ text }", "Starts a paragraph with a note."),
    help("par", "[(paragraph title)] { paragraph }", "Starts a paragraph with a user defined title. Without title, continues the previous \\par."),
    help("param", "'['dir']' <parameter-name> { parameter description }", "Starts the description of a function parameter. The optional direction is [in], [out] or [in,out]."),
    help("parblock", "", "Starts a block of paragraphs that counts as one, e.g. inside a \\param. Ends at \\endparblock."),
    help("endparblock", "", "Ends a block started with \\parblock."),
    help("tparam", "<template-parameter-name> { description }", "Starts the description of a template parameter."),
    help("post", "{ description of the postcondition }", "Starts a paragraph describing a postcondition."),
    help("pre", "{ description of the precondition }", "Starts a paragraph describing a precondition."),
    help("remark", "{ remark text }", "Starts a paragraph with remarks."),
    help("remarks", "{ remark text }", "Equivalent to \\remark."),
    help("result", "{ description of the result value }", "Equivalent to \\return."),
    help("return", "{ description of the return value }", "Starts the description of the return value of a function. See also \\retval."),
    help("returns", "{ description of the return value }", "Equivalent to \\return."),
    help("retval", "<return value> { description }", "Starts the description of one specific return value. See also \\return."),
    help("sa", "{ references }", "Starts a paragraph with cross references to classes, functions or files. Equivalent to \\see."),
    help("see", "{ references }", "Equivalent to \\sa."),
    help("short", "{ short description }", "Equivalent to \\brief."),
    help("since", "{ text }", "Specifies since when an entity is available."),
    help("test", "{ paragraph describing a test case }", "Starts a paragraph describing a test case. Items are collected on a global test list."),
    help("throw", "<exception-object> { exception description }", "Equivalent to \\exception."),
    help("throws", "<exception-object> { exception description }", "Equivalent to \\exception."),
    help("todo", "{ paragraph describing what is to be done }", "Starts a paragraph with a TODO item. Items are collected on a global todo list."),
    help("xrefitem", "<key> \"(heading)\" \"(list title)\" { text }", "Creates a paragraph with the given heading and collects it on the list named by <key>. \\todo, \\bug and \\deprecated are built on it."),
    help("version", "{ version number }", "Starts a paragraph with one or more version strings."),
    help("warning", "{ warning message }", "Starts a paragraph with a warning."),
    help("important", "{ important text }", "Starts a paragraph with an important message."),
    // Links and references
    help("addindex", "(text)", "Adds the text to the LaTeX, DocBook and RTF index."),
    help("anchor", "<word>", "Places an invisible named anchor that \\ref can link to."),
    help("cite", "<label>", "Adds a bibliographic reference to the text and the bibliography list."),
    help("endlink", "", "Ends a link started with \\link."),
    help("link", "<link-object>", "Creates a link to an object with a user specified text, ending at \\endlink."),
    help("ref", "<name> [\"(text)\"]", "Creates a reference to a named section, page or anchor. The optional text replaces the name."),
    help("refitem", "<name>", "Like \\ref, for use in a \\secreflist."),
    help("secreflist", "", "Starts an index list of items created with \\refitem."),
    help("endsecreflist", "", "Ends an index list started with \\secreflist."),
    help("subpage", "<name> [\"(text)\"]", "Creates a hierarchy of pages. The referenced page becomes a subpage of the current one."),
    help("tableofcontents", "['{'[option[:level]][,option[:level]]*'}']", "Creates a table of contents at the top of a page. Options are HTML, LaTeX, XML or DocBook with a level from 1 to 6."),
    help("section", "<section-name> (section title)", "Creates a section with the given name and title."),
    help("subsection", "<subsection-name> (subsection title)", "Creates a subsection. Only valid inside a \\section."),
    help("subsubsection", "<subsubsection-name> (subsubsection title)", "Creates a subsubsection. Only valid inside a \\subsection."),
    help("paragraph", "<paragraph-name> (paragraph title)", "Creates a named paragraph. Only valid inside a \\subsubsection."),
    help("subparagraph", "<subparagraph-name> (subparagraph title)", "Creates a named subparagraph. Only valid inside a \\paragraph."),
    help("subsubparagraph", "<subsubparagraph-name> (subsubparagraph title)", "Creates a named subsubparagraph. Only valid inside a \\subparagraph."),
    // Examples and includes
    help("dontinclude", "['{lineno}'] <file-name>", "Parses a source file without including it. Use \\line, \\skip, \\skipline and \\until to show parts of it."),
    help("include", "['{'option'}'] <file-name>", "Includes a source file as a block of code. Options are lineno, doc, local, strip, nostrip, raise and prefix."),
    help("includelineno", "<file-name>", "Equivalent to \\include{lineno}."),
    help("includedoc", "['{'option'}'] <file-name>", "Includes a file as documentation. Options are raise and prefix."),
    help("line", "( pattern )", "Searches line by line for the pattern in the last \\dontinclude file and shows the first match."),
    help("skip", "( pattern )", "Skips lines of the last \\dontinclude file until one matches the pattern."),
    help("skipline", "( pattern )", "Like \\skip, but also shows the matching line."),
    help("snippet", "['{'option'}'] <file-name> ( block_id )", "Includes the part of a source file between two occurrences of the block marker."),
    help("snippetlineno", "<file-name> ( block_id )", "Like \\snippet, with line numbers."),
    help("snippetdoc", "['{'option'}'] <file-name> ( block_id )", "Includes a snippet of a file as documentation. Options are raise and prefix."),
    help("until", "( pattern )", "Shows lines of the last \\dontinclude file until one matches the pattern."),
    help("verbinclude", "<file-name>", "Includes a file verbatim."),
    help("htmlinclude", "[\"[block]\"] <file-name>", "Includes an HTML file as is in the HTML output."),
    help("latexinclude", "<file-name>", "Includes a LaTeX file as is in the LaTeX output."),
    help("rtfinclude", "<file-name>", "Includes an RTF file as is in the RTF output."),
    help("maninclude", "<file-name>", "Includes a man page file as is in the man output."),
    help("docbookinclude", "<file-name>", "Includes a DocBook file as is in the DocBook output."),
    help("xmlinclude", "<file-name>", "Includes an XML file as is in the XML output."),
    // Visual enhancements
    help("a", "<word>", "Displays <word> in italics. Equivalent to \\e and \\em."),
    help("arg", "{ item-description }", "Starts an item of a simple, not nested list."),
    help("b", "<word>", "Displays <word> in bold."),
    help("c", "<word>", "Displays <word> using a typewriter font. Equivalent to \\p."),
    help("code", "['{'<word>'}']", "Starts a block of code that ends at \\endcode. The option selects the language, e.g. {.py}."),
    help("copydoc", "<link-object>", "Copies the documentation of the referenced object."),
    help("copybrief", "<link-object>", "Like \\copydoc, copying only the brief description."),
    help("copydetails", "<link-object>", "Like \\copydoc, copying only the detailed description."),
    help("docbookonly", "", "Starts a block included only in the DocBook output. Ends at \\enddocbookonly."),
    help("dot", "[\"caption\"] [<sizeindication>=<size>]", "Starts a block with a dot graph description. Ends at \\enddot."),
    help("emoji", "\"name\"", "Inserts the emoji with the given name."),
    help("msc", "[\"caption\"] [<sizeindication>=<size>]", "Starts a block with a message sequence chart. Ends at \\endmsc."),
    help("startuml", "['{'option[,option]'}'] [\"caption\"] [<sizeindication>=<size>]", "Starts a block with a PlantUML diagram. Ends at \\enduml."),
    help("dotfile", "<file> [\"caption\"] [<sizeindication>=<size>]", "Inserts an image generated by dot from <file>."),
    help("mscfile", "<file> [\"caption\"] [<sizeindication>=<size>]", "Inserts an image generated by mscgen from <file>."),
    help("diafile", "<file> [\"caption\"] [<sizeindication>=<size>]", "Inserts an image made in dia from <file>."),
    help("plantumlfile", "<file> [\"caption\"] [<sizeindication>=<size>]", "Inserts an image generated by PlantUML from <file>."),
    help("doxyconfig", "<config_option>", "Inserts the value of a configuration option."),
    help("e", "<word>", "Displays <word> in italics. Equivalent to \\a and \\em."),
    help("em", "<word>", "Displays <word> in italics. Equivalent to \\a and \\e."),
    help("endcode", "", "Ends a block of code started with \\code."),
    help("enddocbookonly", "", "Ends a block started with \\docbookonly."),
    help("enddot", "", "Ends a block started with \\dot."),
    help("endmsc", "", "Ends a block started with \\msc."),
    help("enduml", "", "Ends a block started with \\startuml."),
    help("endhtmlonly", "", "Ends a block started with \\htmlonly."),
    help("endlatexonly", "", "Ends a block started with \\latexonly."),
    help("endmanonly", "", "Ends a block started with \\manonly."),
    help("endrtfonly", "", "Ends a block started with \\rtfonly."),
    help("endverbatim", "", "Ends a block started with \\verbatim."),
    help("endxmlonly", "", "Ends a block started with \\xmlonly."),
    help("f$", "", "Starts and ends an in-text formula."),
    help("f(", "", "Starts an in-text formula in a text environment. Ends at \\f)."),
    help("f)", "", "Ends an in-text formula started with \\f(."),
    help("f[", "", "Starts a long formula displayed centered on a separate line. Ends at \\f]."),
    help("f]", "", "Ends a formula started with \\f[."),
    help("f{", "", "Starts a formula in a specific environment. Ends at \\f}."),
    help("f}", "", "Ends a formula started with \\f{."),
    help("htmlonly", "[\"[block]\"]", "Starts a block included only in the HTML output. Ends at \\endhtmlonly."),
    help("image", "['{'option[,option]'}'] <format> <file> [\"caption\"] [<sizeindication>=<size>]", "Inserts an image. The format is html, latex, docbook, rtf or xml."),
    help("latexonly", "", "Starts a block included only in the LaTeX output. Ends at \\endlatexonly."),
    help("manonly", "", "Starts a block included only in the man output. Ends at \\endmanonly."),
    help("li", "{ item-description }", "Starts an item of a simple, not nested list. Equivalent to \\arg."),
    help("n", "", "Forces a new line."),
    help("p", "<word>", "Displays <word> using a typewriter font, typically for parameters. Equivalent to \\c."),
    help("qualifier", "<label> | \"(text)\"", "Adds a label to the member, like the labels for static or inline members."),
    help("rtfonly", "", "Starts a block included only in the RTF output. Ends at \\endrtfonly."),
    help("verbatim", "", "Starts a block included verbatim. Ends at \\endverbatim."),
    help("xmlonly", "", "Starts a block included only in the XML output. Ends at \\endxmlonly."),
    help("showenumvalues", "", "Shows the values of the enumeration members."),
    help("hideenumvalues", "", "Hides the values of the enumeration members."),
    // Escapes and symbols
    help("\\", "", "Writes a backslash."),
    help("@", "", "Writes an at-sign."),
    help("~", "[LanguageId]", "Enables or disables a language specific filter."),
    help("&", "", "Writes the & character."),
    help("$", "", "Writes the $ character."),
    help("#", "", "Writes the # character."),
    help("<", "", "Writes the < character."),
    help(">", "", "Writes the > character."),
    help("%", "", "Writes the % character."),
    help("\"", "", "Writes the \" character."),
    help(".", "", "Writes a dot, e.g. to prevent an early end of the brief description."),
    help("?", "", "Writes a question mark."),
    help("=", "", "Writes the = character."),
    help("::", "", "Writes a double colon."),
    help("|", "", "Writes a pipe character."),
    help("--", "", "Writes two dashes."),
    help("---", "", "Writes three dashes."),
    help("{", "", "Writes an opening brace."),
    help("}", "", "Writes a closing brace."),
];

static HELP_INDEX: LazyLock<HashMap<&'static str, &'static HelpEntry>> =
    LazyLock::new(|| HELP.iter().map(|entry| (entry.command, entry)).collect());

/// Help for a command (without marker)
pub fn help_for(command: &str) -> Option<&'static HelpEntry> {
    HELP_INDEX.get(command).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::default_groups;

    #[test]
    fn test_every_default_command_has_help() {
        let missing: Vec<&str> = default_groups()
            .commands()
            .into_iter()
            .filter(|c| help_for(c).is_none())
            .collect();
        assert!(missing.is_empty(), "no help for {missing:?}");
    }

    #[test]
    fn test_help_entries_are_unique() {
        assert_eq!(HELP_INDEX.len(), HELP.len());
    }
}
