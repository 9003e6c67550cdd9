use icdgen_registry::{Command, GroupedCommands, Parameter};
use pretty_assertions::assert_eq;

use super::{base, object, routing, table};

fn param(declaration: &str, name: &str) -> Parameter {
	Parameter {
		declaration: declaration.to_owned(),
		name: name.to_owned(),
		excluded: false,
	}
}

fn command(name: &str, handle: Option<&str>, extension: Option<&str>, alias: Option<&str>) -> Command {
	let mut params = vec![param("int value", "value")];
	if let Some(handle) = handle {
		params.insert(0, param(&format!("{handle} h"), "h"));
	}
	Command {
		name: name.to_owned(),
		alias: alias.map(str::to_owned),
		return_type: "int".to_owned(),
		params,
		handle: handle.map(str::to_owned),
		extension: extension.map(str::to_owned),
		excluded: false,
	}
}

/// `foo` on handle `H`, its extension alias `bar`, and a global `baz`.
fn scenario() -> Vec<Command> {
	vec![
		command("foo", Some("H"), None, None),
		command("bar", Some("H"), Some("EXT_X"), Some("foo")),
		command("baz", None, None, None),
	]
}

type Pass = fn(&mut String, &GroupedCommands<'_>) -> std::fmt::Result;

fn run(pass: Pass, commands: &[Command]) -> String {
	let grouped = GroupedCommands::new(commands);
	let mut out = String::new();
	pass(&mut out, &grouped).unwrap();
	out
}

#[test]
fn base_defaults_and_forwards_aliases() {
	let expected = "\
struct VkObjectBase
{
  uintptr_t m_LoaderMagic = ICD_LOADER_MAGIC;
};

struct HBase
{
  virtual ~HBase() = default;

  virtual int foo(
    int value )
  { return {}; }

#ifdef EXT_X

  virtual int bar(
    int value )
  { return foo( value ); }

#endif // EXT_X

};

";
	assert_eq!(run(base::write, &scenario()), expected);
}

#[test]
fn base_void_operations_have_empty_bodies() {
	let mut reset = command("reset", Some("H"), None, None);
	reset.return_type = "void".to_owned();
	let out = run(base::write, &[reset]);
	assert!(out.contains("  virtual void reset(\n    int value )\n  {}\n"));
}

#[test]
fn base_alias_outside_the_group_gets_a_default_body() {
	let mut commands = scenario();
	commands[1].alias = Some("elsewhere".to_owned());
	let out = run(base::write, &commands);
	assert!(out.contains("  virtual int bar(\n    int value )\n  { return {}; }\n"));
	assert!(!out.contains("return elsewhere"));
}

#[test]
fn table_has_a_slot_and_setter_per_operation() {
	let expected = "\
struct MockFunctions
{
  PFN_foo foo = nullptr;
#ifdef EXT_X
  PFN_bar bar = nullptr;
#endif // EXT_X

  void SetProcAddr( const char* pName, PFN_vkVoidFunction pFunction )
  {
    if( !strcmp( \"foo\", pName ) ) { foo = reinterpret_cast<PFN_foo>( pFunction ); return; }
#ifdef EXT_X
    if( !strcmp( \"bar\", pName ) ) { bar = reinterpret_cast<PFN_bar>( pFunction ); return; }
#endif // EXT_X
  }
};

";
	assert_eq!(run(table::write, &scenario()), expected);
}

#[test]
fn object_owns_and_forwards_to_its_base() {
	let expected = "\
struct H_T : vkmock::VkObjectBase
{
  vkmock::HBase* m_pImpl = nullptr;

  explicit H_T( vkmock::HBase* pImpl ) : m_pImpl( pImpl ) {}

  H_T( const H_T& ) = delete;
  H_T& operator=( const H_T& ) = delete;

  H_T( H_T&& other ) noexcept : m_pImpl( other.m_pImpl ) { other.m_pImpl = nullptr; }
  H_T& operator=( H_T&& other ) noexcept
  {
    if( this != &other )
    {
      delete m_pImpl;
      m_pImpl = other.m_pImpl;
      other.m_pImpl = nullptr;
    }
    return *this;
  }

  ~H_T() { delete m_pImpl; }

  int foo(
    int value )
  {
    return m_pImpl->foo( value );
  }

#ifdef EXT_X

  int bar(
    int value )
  {
    return m_pImpl->bar( value );
  }

#endif // EXT_X

};

";
	assert_eq!(run(object::write, &scenario()), expected);
}

#[test]
fn routing_dispatches_through_the_first_argument() {
	let expected = "\
inline int foo(
  H h,
  int value )
{
  return h->foo( value );
}

#ifdef EXT_X

inline int bar(
  H h,
  int value )
{
  return h->bar( value );
}

#endif // EXT_X

int baz(
  int value );

inline PFN_vkVoidFunction vkGetDeviceProcAddr( VkDevice device, const char* pName );

inline PFN_vkVoidFunction vkGetInstanceProcAddr( VkInstance instance, const char* pName )
{
  if( !strcmp( \"foo\", pName ) ) return reinterpret_cast<PFN_vkVoidFunction>( &foo );
#ifdef EXT_X
  if( !strcmp( \"bar\", pName ) ) return reinterpret_cast<PFN_vkVoidFunction>( &bar );
#endif // EXT_X
  if( !strcmp( \"baz\", pName ) ) return reinterpret_cast<PFN_vkVoidFunction>( &baz );
  return nullptr;
}

inline PFN_vkVoidFunction vkGetDeviceProcAddr( VkDevice device, const char* pName )
{
  return vkGetInstanceProcAddr( nullptr, pName );
}
";
	assert_eq!(run(routing::write, &scenario()), expected);
}

#[test]
fn universal_commands_are_only_looked_up() {
	let lookup = command("vkGetInstanceProcAddr", Some("H"), None, None);
	let commands = vec![lookup, command("foo", Some("H"), None, None)];

	for pass in [base::write, table::write, object::write] {
		let out = run(pass, &commands);
		assert!(!out.contains("vkGetInstanceProcAddr"), "{out}");
		assert!(out.contains("foo"));
	}

	let out = run(routing::write, &commands);
	assert!(!out.contains("inline int vkGetInstanceProcAddr"));
	assert!(out.contains("if( !strcmp( \"vkGetInstanceProcAddr\", pName ) )"));
}

#[test]
fn excluded_parameters_are_left_out_of_every_signature() {
	let mut wait = command("wait", Some("H"), None, None);
	wait.params.push(Parameter {
		excluded: true,
		..param("VkFaultData* pFaultData", "pFaultData")
	});
	let commands = [wait];

	for pass in [base::write, table::write, object::write, routing::write] {
		assert!(!run(pass, &commands).contains("pFaultData"));
	}
}

#[test]
fn excluded_commands_are_not_emitted() {
	let mut commands = scenario();
	commands[1].excluded = true;
	for pass in [base::write, table::write, object::write, routing::write] {
		let out = run(pass, &commands);
		assert!(!out.contains("bar"));
		assert!(!out.contains("EXT_X"));
	}
}

#[test]
fn extension_buckets_form_one_region_each() {
	let commands = vec![
		command("a", Some("H"), Some("EXT_X"), None),
		command("b", Some("H"), None, None),
		command("c", Some("H"), Some("EXT_X"), None),
	];
	// The table walks its buckets twice: once for slots, once for the setter.
	let passes: [(Pass, usize); 3] = [(base::write, 1), (table::write, 2), (object::write, 1)];
	for (pass, regions) in passes {
		let out = run(pass, &commands);
		let opened = out.matches("#ifdef EXT_X").count();
		let closed = out.matches("#endif // EXT_X").count();
		assert_eq!((opened, closed), (regions, regions), "{out}");
	}
	let routed = run(routing::write, &commands);
	assert_eq!(routed.matches("#ifdef EXT_X").count(), 2);
	let region_start = routed.find("#ifdef EXT_X").unwrap();
	let region_end = routed.find("#endif // EXT_X").unwrap();
	let region = &routed[region_start..region_end];
	assert!(region.contains("inline int a(") && region.contains("inline int c("));
}

#[test]
fn global_only_registry_has_no_objects() {
	let commands = [command("baz", None, None, None)];
	assert_eq!(run(object::write, &commands), "");
	assert_eq!(
		run(table::write, &commands),
		"struct MockFunctions\n{\n\n  void SetProcAddr( const char* pName, PFN_vkVoidFunction pFunction )\n  {\n  }\n};\n\n"
	);
}
