//! Test fixtures for API descriptions and templates
//!
//! This module provides sample RAML documents and small templates shared by
//! unit and integration tests.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Small pet store API with nested resources, security and schemas.
///
/// `/pets` declares `post` before `get`, and `/{petId}` declares `delete`
/// before `get`, so rendering shows whether methods were reordered.
pub const PETSTORE_RAML: &str = r#"#%RAML 0.8
title: Pet Store
version: v1
baseUri: api.petstore.example/{version}
securitySchemes:
  - oauth_2_0:
      type: OAuth 2.0
      description: Access tokens from the pet store auth server.
documentation:
  - title: Getting started
    content: Register an application first. Then request a token.
/pets:
  displayName: Pets
  description: All pets in the store. Filter with query parameters.
  post:
    description: Add a pet.
    securedBy: [oauth_2_0]
    body:
      application/json:
        schema: http://schemas.petstore.example/pet.json
  get:
    description: List pets.
    queryParameters:
      limit:
        type: integer
        description: Maximum number of pets to return.
    responses:
      200:
        body:
          application/json:
            example: '[{"id": 1}]'
  /{petId}:
    description: A single pet.
    delete:
      description: Remove the pet.
      securedBy: [null, oauth_2_0]
    get:
      description: Fetch the pet.
"#;

/// Test fixture for creating sample RAML files
#[derive(Clone, Debug)]
pub struct RamlFixture {
    pub content: String,
    pub name: String,
}

impl RamlFixture {
    /// The pet store document
    pub fn petstore() -> Self {
        Self {
            name: "petstore.raml".to_string(),
            content: PETSTORE_RAML.to_string(),
        }
    }

    /// One resource declaring `delete` before `get`
    pub fn delete_then_get() -> Self {
        Self {
            name: "ordering.raml".to_string(),
            content: "title: Ordering\n/items:\n  delete:\n    description: Remove.\n  get:\n    description: Read.\n"
                .to_string(),
        }
    }

    /// Document with broken YAML syntax
    pub fn invalid_syntax() -> Self {
        Self {
            name: "invalid.raml".to_string(),
            content: "title: [unclosed\n/items:\n  get:\n".to_string(),
        }
    }

    /// Write the fixture to a directory
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(&self.name);
        fs::write(&path, &self.content)
            .with_context(|| format!("Failed to write fixture {}", path.display()))?;
        Ok(path)
    }
}

/// Test fixture for template files
#[derive(Clone, Debug)]
pub struct TemplateFixture {
    pub content: String,
    pub name: String,
}

impl TemplateFixture {
    /// Main template printing every method of every top-level resource, in order
    pub fn method_echo() -> Self {
        Self::simple(
            "methods.tera",
            "{% for resource in resources %}{% for m in resource.methods %}{{ m.method | upper }} {% endfor %}{% endfor %}",
        )
    }

    pub fn simple(name: &str, content: &str) -> Self {
        Self {
            name: name.to_string(),
            content: content.to_string(),
        }
    }

    /// Write the fixture to a directory
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(&self.name);
        fs::write(&path, &self.content)
            .with_context(|| format!("Failed to write fixture {}", path.display()))?;
        Ok(path)
    }
}
