use crate::cli::GeneratorOptions;
use crate::codegen::statement::{Directive, MappingPlan, Statement, TableConstants};
use crate::codegen::usings::UsingCollector;
use crate::codegen::{member_selector, to_literal, Renderer};
use crate::error::GenError;
use crate::schema::Cardinality;

const INDENT: &str = "    ";

/// Renders a mapping plan as an `IEntityTypeConfiguration<T>` class.
pub struct MappingRenderer;

impl Renderer for MappingRenderer {
    fn extension(&self) -> &'static str {
        "cs"
    }

    fn render(&self, plan: &MappingPlan, options: &GeneratorOptions) -> Result<String, GenError> {
        let mut w = CodeWriter::default();

        if options.single_file {
            write_class(&mut w, plan, options);
            return Ok(w.finish());
        }

        let mut usings = UsingCollector::new();
        usings.add("Microsoft.EntityFrameworkCore");
        usings.add("Microsoft.EntityFrameworkCore.Metadata.Builders");
        if plan.has_row_version() {
            usings.add("Microsoft.EntityFrameworkCore.Storage.ValueConversion");
        }
        usings.add("System");
        usings.add("System.Collections.Generic");
        if plan.entity_namespace != plan.mapping_namespace {
            usings.add(&plan.entity_namespace);
        }
        for line in usings.render().lines() {
            w.line(line);
        }
        w.blank();

        let wrapped = !plan.mapping_namespace.is_empty();
        if wrapped {
            w.line(format!("namespace {}", plan.mapping_namespace));
            w.line("{");
            w.indent();
        }
        write_class(&mut w, plan, options);
        if wrapped {
            w.outdent();
            w.line("}");
        }

        Ok(w.finish())
    }
}

/// Line buffer with a current indentation level.
#[derive(Debug, Default)]
struct CodeWriter {
    lines: Vec<String>,
    level: usize,
}

impl CodeWriter {
    fn line(&mut self, text: impl AsRef<str>) {
        let text = text.as_ref();
        if text.is_empty() {
            self.lines.push(String::new());
        } else {
            self.lines.push(format!("{}{text}", INDENT.repeat(self.level)));
        }
    }

    fn blank(&mut self) {
        self.lines.push(String::new());
    }

    fn indent(&mut self) {
        self.level += 1;
    }

    fn outdent(&mut self) {
        self.level = self.level.saturating_sub(1);
    }

    /// Write `head` followed by indented chained calls, terminated with `;`.
    fn chain(&mut self, head: String, calls: Vec<String>) {
        if calls.is_empty() {
            self.line(format!("{head};"));
            return;
        }
        self.line(head);
        self.indent();
        let last = calls.len() - 1;
        for (i, call) in calls.into_iter().enumerate() {
            if i == last {
                self.line(format!("{call};"));
            } else {
                self.line(call);
            }
        }
        self.outdent();
    }

    fn finish(self) -> String {
        let mut output = self.lines.join("\n");
        output.push('\n');
        output
    }
}

fn write_class(w: &mut CodeWriter, plan: &MappingPlan, options: &GeneratorOptions) {
    let qualified = qualified_entity(plan);

    if options.document {
        w.line("/// <summary>");
        w.line(format!(
            "/// Allows configuration for an entity type <see cref=\"{qualified}\" />"
        ));
        w.line("/// </summary>");
    }
    w.line(format!(
        "internal class {} : IEntityTypeConfiguration<{}>",
        plan.mapping_class, plan.entity_class
    ));
    w.line("{");
    w.indent();

    write_configure(w, plan, options, &qualified);
    if let Some(ref constants) = plan.constants {
        w.blank();
        write_constants(w, constants, options, &qualified);
    }

    w.outdent();
    w.line("}");
}

fn write_configure(
    w: &mut CodeWriter,
    plan: &MappingPlan,
    options: &GeneratorOptions,
    qualified: &str,
) {
    if options.document {
        w.line("/// <summary>");
        w.line(format!(
            "/// Configures the entity of type <see cref=\"{qualified}\" />"
        ));
        w.line("/// </summary>");
        w.line("/// <param name=\"builder\">The builder to be used to configure the entity type.</param>");
    }
    w.line(format!(
        "public void Configure(EntityTypeBuilder<{}> builder)",
        plan.entity_class
    ));
    w.line("{");
    w.indent();

    let mut section: Option<&str> = None;
    for statement in &plan.statements {
        if section.is_some() {
            w.blank();
        }
        if section != Some(statement.section()) {
            w.line(format!("// {}", statement.section()));
            section = Some(statement.section());
        }
        write_statement(w, statement, &plan.entity_class);
    }

    w.outdent();
    w.line("}");
}

fn write_statement(w: &mut CodeWriter, statement: &Statement, entity_class: &str) {
    match statement {
        Statement::Table { name, schema } => {
            w.line(format!("builder.ToTable({});", table_args(name, schema)));
        }
        Statement::View { name, schema } => {
            w.line(format!("builder.ToView({});", table_args(name, schema)));
        }
        Statement::NoKey => w.line("builder.HasNoKey();"),
        Statement::Key { columns } => {
            w.line(format!(
                "builder.HasKey(e => {});",
                member_selector("e", columns)
            ));
        }
        Statement::Property {
            property,
            directives,
        } => {
            w.chain(
                format!("builder.Property(e => e.{property})"),
                directives.iter().map(directive_call).collect(),
            );
        }
        Statement::Relationship {
            navigation,
            cardinality,
            principal_navigation,
            foreign_key,
            one_to_one,
            constraint_name,
        } => {
            let with = match cardinality {
                Cardinality::Many => "WithMany",
                Cardinality::One => "WithOne",
            };
            let type_arg = if *one_to_one {
                format!("<{entity_class}>")
            } else {
                String::new()
            };
            let mut calls = vec![
                format!(".{with}(p => p.{principal_navigation})"),
                format!(
                    ".HasForeignKey{type_arg}(e => {})",
                    member_selector("e", foreign_key)
                ),
                ".OnDelete(DeleteBehavior.Restrict)".to_string(),
            ];
            if let Some(name) = constraint_name {
                calls.push(format!(".HasConstraintName({})", to_literal(name)));
            }
            w.chain(format!("builder.HasOne(e => e.{navigation})"), calls);
        }
        Statement::Index {
            columns,
            name,
            filter,
            unique,
        } => {
            let mut calls = Vec::new();
            if let Some(name) = name {
                calls.push(format!(".HasDatabaseName({})", to_literal(name)));
            }
            if let Some(filter) = filter {
                calls.push(format!(".HasFilter({})", to_literal(filter)));
            }
            if *unique {
                calls.push(".IsUnique()".to_string());
            }
            w.chain(
                format!("builder.HasIndex(e => {})", member_selector("e", columns)),
                calls,
            );
        }
        Statement::AlternateKey { columns, name } => {
            w.chain(
                format!(
                    "builder.HasAlternateKey(e => {})",
                    member_selector("e", columns)
                ),
                vec![format!(".HasName({})", to_literal(name))],
            );
        }
    }
}

fn directive_call(directive: &Directive) -> String {
    match directive {
        Directive::RowVersion => ".IsRowVersion()".to_string(),
        Directive::Required(true) => ".IsRequired()".to_string(),
        Directive::Required(false) => ".IsRequired(false)".to_string(),
        Directive::NumberToBytesConversion => {
            ".HasConversion(new NumberToBytesConverter<ulong>())".to_string()
        }
        Directive::ColumnType(t) => format!(".HasColumnType({})", to_literal(t)),
        Directive::ColumnName(n) => format!(".HasColumnName({})", to_literal(n)),
        Directive::Unicode(true) => ".IsUnicode()".to_string(),
        Directive::Unicode(false) => ".IsUnicode(false)".to_string(),
        Directive::MaxLength(n) => format!(".HasMaxLength({n})"),
        Directive::DefaultValueSql(sql) => format!(".HasDefaultValueSql({})", to_literal(sql)),
        Directive::ComputedColumnSql(sql) => {
            format!(".HasComputedColumnSql({})", to_literal(sql))
        }
        Directive::ValueGeneratedOnAdd => ".ValueGeneratedOnAdd()".to_string(),
        Directive::ValueGeneratedOnAddOrUpdate => ".ValueGeneratedOnAddOrUpdate()".to_string(),
        Directive::ValueGeneratedOnUpdate => ".ValueGeneratedOnUpdate()".to_string(),
    }
}

fn write_constants(
    w: &mut CodeWriter,
    constants: &TableConstants,
    options: &GeneratorOptions,
    qualified: &str,
) {
    w.line("public struct Table");
    w.line("{");
    w.indent();
    if let Some(ref schema) = constants.schema {
        if options.document {
            w.line(format!(
                "/// <summary>Table Schema name constant for entity <see cref=\"{qualified}\" /></summary>"
            ));
        }
        w.line(format!("public const string Schema = {};", to_literal(schema)));
    }
    if options.document {
        w.line(format!(
            "/// <summary>Table Name constant for entity <see cref=\"{qualified}\" /></summary>"
        ));
    }
    w.line(format!(
        "public const string Name = {};",
        to_literal(&constants.name)
    ));
    w.outdent();
    w.line("}");

    w.blank();
    w.line("public struct Columns");
    w.line("{");
    w.indent();
    for (property, column) in &constants.columns {
        if options.document {
            w.line(format!(
                "/// <summary>Column Name constant for property <see cref=\"{qualified}.{property}\" /></summary>"
            ));
        }
        w.line(format!(
            "public const string {property} = {};",
            to_literal(column)
        ));
    }
    w.outdent();
    w.line("}");
}

fn table_args(name: &str, schema: &Option<String>) -> String {
    match schema {
        Some(schema) => format!("{}, {}", to_literal(name), to_literal(schema)),
        None => to_literal(name),
    }
}

fn qualified_entity(plan: &MappingPlan) -> String {
    if plan.entity_namespace.is_empty() {
        plan.entity_class.clone()
    } else {
        format!("{}.{}", plan.entity_namespace, plan.entity_class)
    }
}
