//! Static pages served to browsers. Kept as plain string constants;
//! nothing here is templated.

/// The signup form. The input names are the contract with the
/// submission handler.
pub const SIGNUP_FORM: &str = r#"<html>
<body>
<h1>shared host signup</h1>
<form action="/post" method="post">
Username:
<input type="text" name="username"><br/>
Email:
<input type="email" name="email"><br/>
Why would you want an account here?
<textarea name="why" cols="50" rows="10"></textarea><br/>
SSH public key:
<textarea name="sshpublickey" cols="50" rows="10"></textarea><br/>
<input type="submit" value="Submit">
</form>
</body>
</html>
"#;

/// Shown after a submission is rejected for missing fields. Nothing is
/// persisted on this path.
pub const REJECTED: &str = r#"<html>
<body>
<h1>incomplete signup</h1>
<p>Every field is required. Go back and fill in the missing ones.</p>
</body>
</html>
"#;
