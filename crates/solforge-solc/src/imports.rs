//! Import directive scanning and path resolution.
//!
//! Follows solc's rules: a path starting with `./` or `../` is relative to the
//! directory of the importing unit, anything else is used as given.

use std::sync::LazyLock;

use regex::Regex;

static COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)/\*.*?\*/|//[^\n]*").expect("valid comment regex"));

static IMPORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\bimport\s+(?:[^;"']*?\bfrom\s+)?["']([^"']+)["']"#).expect("valid import regex")
});

/// Import paths exactly as written in `source`, in order of appearance.
pub fn import_paths(source: &str) -> Vec<String> {
    let code = COMMENT.replace_all(source, "");
    IMPORT
        .captures_iter(&code)
        .map(|caps| caps[1].to_string())
        .collect()
}

/// Source unit name for `import` as seen from the unit named `importer`.
pub fn resolve_import(importer: &str, import: &str) -> String {
    if !(import.starts_with("./") || import.starts_with("../")) {
        return import.to_string();
    }

    let mut parts: Vec<&str> = importer.split('/').collect();
    parts.pop();
    for segment in import.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                parts.pop();
            }
            s => parts.push(s),
        }
    }
    parts.join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_forms() {
        let source = r#"
            pragma solidity ^0.8.20;
            import "@openzeppelin/contracts/token/ERC721/ERC721.sol";
            import './Base.sol' as Base;
            import {Ownable} from "@openzeppelin/contracts/access/Ownable.sol";
            import { Strings as S, Math } from "../utils/Strings.sol";
            import * as Lib from "lib/Lib.sol";
            contract StonerSharks {}
        "#;
        assert_eq!(
            import_paths(source),
            vec![
                "@openzeppelin/contracts/token/ERC721/ERC721.sol",
                "./Base.sol",
                "@openzeppelin/contracts/access/Ownable.sol",
                "../utils/Strings.sol",
                "lib/Lib.sol",
            ]
        );
    }

    #[test]
    fn test_commented_imports_are_ignored() {
        let source = r#"
            // import "commented/Line.sol";
            /* import "commented/Block.sol";
               import "commented/Block2.sol"; */
            import "real/Dep.sol";
        "#;
        assert_eq!(import_paths(source), vec!["real/Dep.sol"]);
    }

    #[test]
    fn test_no_imports() {
        assert!(import_paths("contract A { function importantThing() public {} }").is_empty());
    }

    #[test]
    fn test_resolve_relative_imports() {
        let importer = "@openzeppelin/contracts/token/ERC721/ERC721.sol";
        assert_eq!(
            resolve_import(importer, "./IERC721.sol"),
            "@openzeppelin/contracts/token/ERC721/IERC721.sol"
        );
        assert_eq!(
            resolve_import(importer, "../../utils/Context.sol"),
            "@openzeppelin/contracts/utils/Context.sol"
        );
    }

    #[test]
    fn test_resolve_from_top_level_unit() {
        assert_eq!(resolve_import("EthTemplate.sol", "./Base.sol"), "Base.sol");
    }

    #[test]
    fn test_direct_imports_are_unchanged() {
        assert_eq!(
            resolve_import("EthTemplate.sol", "@openzeppelin/contracts/access/Ownable.sol"),
            "@openzeppelin/contracts/access/Ownable.sol"
        );
    }
}
